//! Batch runs against temporary source and destination trees.

mod common;

use common::{config, read_doc, write_doc, StubConverter};
use tc2sc::{BatchDriver, ConversionError};

#[tokio::test]
async fn converts_manifest_into_destination_tree() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_doc(source.path(), "/index.md", "這是[文檔](/zht/docs/faq.md)");
    write_doc(source.path(), "/docs/faq.md", "<!-- do not translate -->\n這");
    write_doc(source.path(), "/learn/deep/roots.md", "`碼` 碼");

    let config = config(
        source.path(),
        dest.path(),
        &["/index.md", "/docs/faq.md", "/learn/deep/roots.md"],
    );
    let manifest = config.manifest().unwrap();

    let mut lines = Vec::new();
    let summary = BatchDriver::from_config(&config, StubConverter::new())
        .run(&manifest, |report| lines.push(report.status_line()))
        .await
        .unwrap();

    assert_eq!(
        lines,
        vec![
            "/index.md translated.",
            "/docs/faq.md not translated.",
            "/learn/deep/roots.md translated.",
        ]
    );
    assert_eq!(summary.total(), 3);
    assert_eq!(read_doc(dest.path(), "/index.md"), "这是[文檔](/docs/faq.md)");
    assert_eq!(read_doc(dest.path(), "/docs/faq.md"), "<!-- do not translate -->\n這");
    assert_eq!(read_doc(dest.path(), "/learn/deep/roots.md"), "`碼` 码");
}

#[tokio::test]
async fn failure_keeps_earlier_outputs_and_stops() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_doc(source.path(), "/one.md", "這");
    write_doc(source.path(), "/three.md", "這");

    let config = config(source.path(), dest.path(), &["/one.md", "/two.md", "/three.md"]);
    let manifest = config.manifest().unwrap();

    let mut lines = Vec::new();
    let err = BatchDriver::from_config(&config, StubConverter::new())
        .run(&manifest, |report| lines.push(report.status_line()))
        .await
        .unwrap_err();

    match err {
        ConversionError::FileError { path, .. } => assert!(path.ends_with("two.md")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(lines, vec!["/one.md translated."]);
    assert_eq!(read_doc(dest.path(), "/one.md"), "这");
    assert!(!dest.path().join("three.md").exists());
}

#[tokio::test]
async fn concurrent_jobs_report_in_manifest_order() {
    let source = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let ids: Vec<String> = (0..12).rev().map(|i| format!("/p/{i}.md")).collect();
    for (i, id) in ids.iter().enumerate() {
        write_doc(source.path(), id, &"簡體".repeat(1 + i * 50));
    }

    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let mut config = config(source.path(), dest.path(), &id_refs);
    config.jobs = 3;
    let manifest = config.manifest().unwrap();

    let mut seen = Vec::new();
    BatchDriver::from_config(&config, StubConverter::new())
        .run(&manifest, |report| seen.push(report.id.to_string()))
        .await
        .unwrap();

    assert_eq!(seen, ids);
    assert_eq!(read_doc(dest.path(), "/p/11.md"), "简体");
}
