use std::fs;
use std::path::Path;

use sch2board_schematic::{walk, walk_with, InMemoryDocumentSource};
use tempfile::TempDir;

fn symbol(label: &str, x: f64, y: f64) -> String {
    format!(
        r#"  (symbol (lib_id "Device:C") (at {x} {y} 0) (unit 1)
    (property "Reference" "{label}" (at {x} {y} 0))
    (property "Value" "100n" (at {x} {y} 0)))
"#
    )
}

fn sheet(file: &str) -> String {
    format!(
        r#"  (sheet (at 20 20) (size 30 20)
    (property "Sheetname" "{file}" (at 20 19 0))
    (property "Sheetfile" "{file}" (at 20 41 0)))
"#
    )
}

fn document(parts: &[String]) -> String {
    format!("(kicad_sch (version 20231120)\n{})\n", parts.concat())
}

fn write(dir: &Path, name: &str, parts: &[String]) {
    fs::write(dir.join(name), document(parts)).unwrap();
}

#[test]
fn test_self_referencing_sheet_terminates() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "root.kicad_sch",
        &[symbol("C1", 10.0, 10.0), sheet("root.kicad_sch"), symbol("C2", 20.0, 10.0)],
    );

    let tree = walk(&temp.path().join("root.kicad_sch"));
    assert_eq!(tree.documents.len(), 1);
    let labels: Vec<&String> = tree.symbols.keys().collect();
    assert_eq!(labels, vec!["C1", "C2"]);
}

#[test]
fn test_mutual_cycle_terminates() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.kicad_sch", &[symbol("A1", 0.0, 0.0), sheet("b.kicad_sch")]);
    write(temp.path(), "b.kicad_sch", &[symbol("B1", 5.0, 0.0), sheet("a.kicad_sch")]);

    let tree = walk(&temp.path().join("a.kicad_sch"));
    assert_eq!(tree.documents.len(), 2);
    assert_eq!(tree.symbols.len(), 2);
}

#[test]
fn test_equivalent_paths_are_one_document() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    write(
        temp.path(),
        "root.kicad_sch",
        &[sheet("sub/child.kicad_sch"), sheet("./sub/../sub/child.kicad_sch")],
    );
    write(&temp.path().join("sub"), "child.kicad_sch", &[symbol("R7", 1.0, 1.0)]);

    let tree = walk(&temp.path().join("root.kicad_sch"));
    assert_eq!(tree.documents.len(), 2);
    assert_eq!(tree.symbols.len(), 1);
}

#[test]
fn test_missing_child_is_skipped() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "root.kicad_sch",
        &[symbol("U1", 1.0, 2.0), sheet("gone.kicad_sch"), sheet("here.kicad_sch")],
    );
    write(temp.path(), "here.kicad_sch", &[symbol("U2", 3.0, 4.0)]);

    let tree = walk(&temp.path().join("root.kicad_sch"));
    assert_eq!(tree.documents.len(), 2);
    assert!(tree.symbols.contains_key("U1"));
    assert!(tree.symbols.contains_key("U2"));
}

#[test]
fn test_missing_root_yields_nothing() {
    let temp = TempDir::new().unwrap();
    let tree = walk(&temp.path().join("absent.kicad_sch"));
    assert!(tree.symbols.is_empty());
}

#[test]
fn test_diamond_reads_shared_document_once() {
    let source = InMemoryDocumentSource::new()
        .with(
            "/proj/root.kicad_sch",
            document(&[sheet("left.kicad_sch"), sheet("right.kicad_sch")]),
        )
        .with(
            "/proj/left.kicad_sch",
            document(&[symbol("L1", 0.0, 0.0), sheet("shared.kicad_sch")]),
        )
        .with(
            "/proj/right.kicad_sch",
            document(&[symbol("R1", 50.0, 0.0), sheet("shared.kicad_sch")]),
        )
        .with("/proj/shared.kicad_sch", document(&[symbol("S1", 25.0, 25.0)]));

    let tree = walk_with(&source, Path::new("/proj/root.kicad_sch"));

    assert_eq!(source.read_count("/proj/shared.kicad_sch"), 1);
    assert_eq!(source.read_count("/proj/root.kicad_sch"), 1);
    assert_eq!(tree.documents.len(), 4);
    assert_eq!(tree.symbols.len(), 3);
    assert_eq!(tree.symbols["S1"].x, 25.0);
}

#[test]
fn test_malformed_symbols_are_skipped() {
    let temp = TempDir::new().unwrap();
    let broken = r#"  (symbol (lib_id "Device:R") (property "Reference" "R9"))
  (symbol (at 1 1 0) (property "Value" "1k"))
"#
    .to_string();
    write(temp.path(), "root.kicad_sch", &[broken, symbol("R1", 3.0, 3.0)]);

    let tree = walk(&temp.path().join("root.kicad_sch"));
    let labels: Vec<&String> = tree.symbols.keys().collect();
    assert_eq!(labels, vec!["R1"]);
}
