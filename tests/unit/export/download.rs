use super::*;

fn sample() -> Download {
    Download {
        filename: EXPORT_FILENAME.to_owned(),
        png: vec![0x89, b'P', b'N', b'G'],
        data_uri: "data:image/png;base64,iVBORw==".to_owned(),
        width: 2,
        height: 2,
    }
}

#[test]
fn in_memory_keeps_order() {
    let mut sink = InMemoryDownloads::new();
    sink.deliver(sample()).unwrap();
    let mut second = sample();
    second.width = 4;
    sink.deliver(second).unwrap();
    assert_eq!(sink.downloads().len(), 2);
    assert_eq!(sink.last().unwrap().width, 4);
}

#[test]
fn file_sink_uses_filename_inside_a_directory() {
    let dir = std::env::temp_dir().join(format!("sparkle-dl-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let mut sink = FileDownloads::new(&dir);
    sink.deliver(sample()).unwrap();
    let path = dir.join(EXPORT_FILENAME);
    assert_eq!(sink.written(), &[path.clone()]);
    assert_eq!(std::fs::read(&path).unwrap(), sample().png);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn file_sink_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("sparkle-dl-nested-{}", std::process::id()));
    let path = dir.join("a").join("out.png");
    let mut sink = FileDownloads::new(&path);
    sink.deliver(sample()).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
