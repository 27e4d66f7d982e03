use super::*;

#[test]
fn normalize_rejects_escapes() {
    assert_eq!(
        normalize_rel_path("a\\b.png").unwrap(),
        PathBuf::from("a").join("b.png")
    );
    assert_eq!(
        normalize_rel_path("./a/b.png").unwrap(),
        PathBuf::from("a/b.png")
    );
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn search_tries_roots_in_order() {
    let base = std::env::temp_dir().join(format!("opentsg_search_{}", std::process::id()));
    let first = base.join("first");
    let second = base.join("second");
    std::fs::create_dir_all(&first).unwrap();
    std::fs::create_dir_all(&second).unwrap();
    std::fs::write(second.join("lut.txt"), b"second").unwrap();
    std::fs::write(first.join("only_first.txt"), b"first").unwrap();

    let searcher = LocalSearcher::new([first.clone(), second.clone()]);
    assert_eq!(searcher.search("lut.txt").unwrap(), b"second");
    assert_eq!(searcher.search("only_first.txt").unwrap(), b"first");
    assert!(searcher.search("missing.txt").is_err());

    let _ = std::fs::remove_dir_all(&base);
}
