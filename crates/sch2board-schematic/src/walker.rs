//! Traversal of a root schematic and every sheet it references.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::record::{extract_sheet_files, extract_symbol_record};
use crate::source::{DocumentSource, FsDocumentSource};
use crate::SymbolMap;

/// Result of walking a schematic hierarchy.
#[derive(Debug, Clone, Default)]
pub struct SchematicTree {
    /// Every symbol record found, keyed by label. When a label occurs more
    /// than once, the last document visited wins.
    pub symbols: SymbolMap,
    /// Canonical paths of the documents read, in visit order
    pub documents: Vec<PathBuf>,
}

/// Walk a schematic hierarchy on the file system.
pub fn walk(root: &Path) -> SchematicTree {
    walk_with(&FsDocumentSource, root)
}

/// Walk a schematic hierarchy starting at `root`.
///
/// Documents are visited depth-first, children in the order their sheets are
/// declared. Each document is read at most once regardless of how many sheets
/// point at it, so self references and cycles terminate. Missing or unreadable
/// documents are skipped.
pub fn walk_with<S: DocumentSource + ?Sized>(source: &S, root: &Path) -> SchematicTree {
    let mut tree = SchematicTree::default();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(path) = pending.pop() {
        let path = match source.canonicalize(&path) {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping schematic {}: {e}", path.display());
                continue;
            }
        };

        if !visited.insert(path.clone()) {
            debug!("Already visited {}", path.display());
            continue;
        }

        let contents = match source.read_document(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Skipping schematic {}: {e}", path.display());
                continue;
            }
        };

        let before = tree.symbols.len();
        for block in sch2board_sexpr::blocks(&contents, "symbol") {
            if let Some(record) = extract_symbol_record(block.text) {
                tree.symbols.insert(record.label.clone(), record);
            }
        }

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let children: Vec<PathBuf> = sch2board_sexpr::blocks(&contents, "sheet")
            .flat_map(|sheet| extract_sheet_files(sheet.text))
            .map(|file| dir.join(file))
            .collect();

        debug!(
            "Read {}: {} new symbols, {} sheet references",
            path.display(),
            tree.symbols.len().saturating_sub(before),
            children.len()
        );

        // Reverse so the first declared sheet is visited first.
        pending.extend(children.into_iter().rev());
        tree.documents.push(path);
    }

    debug!(
        "Walked {} documents, {} symbols",
        tree.documents.len(),
        tree.symbols.len()
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryDocumentSource;

    fn symbol(label: &str, x: f64, y: f64) -> String {
        format!(r#"(symbol (lib_id "Device:R") (at {x} {y} 0) (property "Reference" "{label}"))"#)
    }

    fn sheet(file: &str) -> String {
        format!(r#"(sheet (at 0 0) (property "Sheetfile" "{file}"))"#)
    }

    #[test]
    fn test_walks_children_relative_to_parent() {
        let root = format!(
            "(kicad_sch {} {})",
            symbol("R1", 1.0, 2.0),
            sheet("sub/child.kicad_sch")
        );
        let child = format!(
            "(kicad_sch {} {})",
            symbol("R2", 3.0, 4.0),
            sheet("../leaf.kicad_sch")
        );
        let source = InMemoryDocumentSource::new()
            .with("/p/root.kicad_sch", root)
            .with("/p/sub/child.kicad_sch", child)
            .with("/p/leaf.kicad_sch", format!("(kicad_sch {})", symbol("R3", 5.0, 6.0)));

        let tree = walk_with(&source, Path::new("/p/root.kicad_sch"));
        let labels: Vec<&str> = tree.symbols.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["R1", "R2", "R3"]);
        assert_eq!(
            tree.documents,
            vec![
                PathBuf::from("/p/root.kicad_sch"),
                PathBuf::from("/p/sub/child.kicad_sch"),
                PathBuf::from("/p/leaf.kicad_sch"),
            ]
        );
    }

    #[test]
    fn test_last_visited_document_wins() {
        let source = InMemoryDocumentSource::new()
            .with(
                "/root.kicad_sch",
                format!(
                    "(kicad_sch {} {} {})",
                    symbol("U1", 0.0, 0.0),
                    sheet("a.kicad_sch"),
                    sheet("b.kicad_sch")
                ),
            )
            .with("/a.kicad_sch", symbol("U1", 10.0, 10.0))
            .with("/b.kicad_sch", symbol("U1", 20.0, 20.0));

        let tree = walk_with(&source, Path::new("/root.kicad_sch"));
        assert_eq!(tree.symbols.len(), 1);
        assert_eq!(tree.symbols["U1"].x, 20.0);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let source = InMemoryDocumentSource::new();
        let tree = walk_with(&source, Path::new("/missing.kicad_sch"));
        assert!(tree.symbols.is_empty());
        assert!(tree.documents.is_empty());
    }
}
