use std::fs;

use tempfile::TempDir;

use super::*;

fn touch(temp: &TempDir, relative: &str) {
    let path = temp.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"de").unwrap();
}

fn names(temp: &TempDir, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.strip_prefix(temp.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_enumerate_recursive() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.torrent");
    touch(&temp, "notes.txt");
    touch(&temp, "sub/b.torrent");
    touch(&temp, "sub/deeper/c.torrent");

    let files = enumerate(temp.path(), &Walk::new()).unwrap();
    assert_eq!(
        names(&temp, &files),
        ["a.torrent", "sub/b.torrent", "sub/deeper/c.torrent"]
    );
}

#[test]
fn test_enumerate_flat() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.torrent");
    touch(&temp, "sub/b.torrent");

    let files = enumerate(temp.path(), &Walk::new().recursive(false)).unwrap();
    assert_eq!(names(&temp, &files), ["a.torrent"]);
}

#[test]
fn test_enumerate_custom_extensions() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "a.torrent");
    touch(&temp, "abc.fastresume");
    touch(&temp, "resume.dat");
    touch(&temp, "resume.dat.old");

    let walk = Walk::new().extensions([".fastresume", "resume.dat"]);
    let files = enumerate(temp.path(), &walk).unwrap();
    assert_eq!(names(&temp, &files), ["abc.fastresume", "resume.dat"]);
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn test_enumerate_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let latin1 = temp.path().join(OsStr::from_bytes(b"caf\xe9.torrent"));
    fs::write(&latin1, b"de").unwrap();
    touch(&temp, "plain.torrent");

    let files = enumerate(temp.path(), &Walk::new()).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.contains(&latin1));
}

#[test]
fn test_enumerate_explicit_file() {
    let temp = TempDir::new().unwrap();
    touch(&temp, "resume.bin");
    let path = temp.path().join("resume.bin");

    let files = enumerate(&path, &Walk::new()).unwrap();
    assert_eq!(files, vec![path]);
}

#[test]
fn test_enumerate_missing_root() {
    let temp = TempDir::new().unwrap();
    let err = enumerate(&temp.path().join("nope"), &Walk::new()).unwrap_err();
    assert!(matches!(err, DiscoverError::Unreadable { .. }));
}

#[test]
fn test_client_parse() {
    assert_eq!("qbittorrent".parse::<Client>().unwrap(), Client::QBittorrent);
    assert_eq!(
        "Transmission-Daemon".parse::<Client>().unwrap(),
        Client::TransmissionDaemon
    );
    assert!(matches!(
        "vuze".parse::<Client>(),
        Err(DiscoverError::UnknownClient(_))
    ));

    for client in Client::ALL {
        assert_eq!(client.to_string().parse::<Client>().unwrap(), client);
        assert!(!client.extensions().is_empty());
    }
}

#[test]
fn test_client_state_dir() {
    let home = TempDir::new().unwrap();
    let client = Client::Transmission;
    let relative = client.relative_state_dir().expect("known on every platform");

    let err = client.state_dir(home.path()).unwrap_err();
    assert!(matches!(
        err,
        DiscoverError::ClientPathUnreadable { client: Client::Transmission, .. }
    ));

    fs::create_dir_all(home.path().join(relative)).unwrap();
    assert_eq!(client.state_dir(home.path()).unwrap(), home.path().join(relative));
}

#[test]
fn test_client_files() {
    let home = TempDir::new().unwrap();
    let client = Client::QBittorrent;
    let relative = client.relative_state_dir().expect("known on every platform");

    touch(&home, &format!("{relative}/abc.fastresume"));
    touch(&home, &format!("{relative}/abc.torrent"));
    touch(&home, &format!("{relative}/queue"));

    let files = client.files(home.path()).unwrap();
    let found: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(found, ["abc.fastresume", "abc.torrent"]);
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn test_utorrent_has_no_linux_path() {
    let home = TempDir::new().unwrap();
    assert!(matches!(
        Client::UTorrent.state_dir(home.path()),
        Err(DiscoverError::NoClientPath(Client::UTorrent))
    ));
}
