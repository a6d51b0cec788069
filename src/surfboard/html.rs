//! HTML Document Adapter
//!
//! Converts raw modem HTML into a small row/cell tree so the page parsers never touch
//! the HTML library directly.
//!
//! # Text Extraction
//!
//! A cell's text is its *own* leading text: the text nodes before its first child
//! element, trimmed. The SB6141 nests explanatory tables inside some label cells
//! (e.g. `Power Level<table>...</table>`), and only the leading text names the row.

use scraper::{ElementRef, Html};

/// A `<tr>` reduced to its cell texts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    /// Own text of each `<td>`/`<th>` child, trimmed (empty when the cell has none)
    pub cells: Vec<String>,
    /// First non-empty own text found anywhere below the row
    pub heading: Option<String>,
}

impl TableRow {
    /// Builds a row from plain cell texts; the heading is the first non-empty cell.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells
            .into_iter()
            .map(|cell| cell.into().trim().to_string())
            .collect();
        let heading = cells.iter().find(|cell| !cell.is_empty()).cloned();
        Self { cells, heading }
    }
}

/// A `<table>` reduced to its body rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    pub rows: Vec<TableRow>,
}

impl HtmlTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }
}

/// Every `<tr>` in the document, nested ones included, in document order
pub fn document_rows(html: &str) -> Vec<TableRow> {
    let document = Html::parse_document(html);
    descendants_named(document.root_element(), "tr")
        .map(table_row)
        .collect()
}

/// Every `<table>` in the document with its direct `<tbody>` rows
///
/// Rows of nested tables belong to the nested table only, so a label cell carrying an
/// explanatory sub-table does not disturb the row layout of its parent.
pub fn document_tables(html: &str) -> Vec<HtmlTable> {
    let document = Html::parse_document(html);
    descendants_named(document.root_element(), "table")
        .map(|table| {
            let rows = children_named(table, &["tbody"])
                .flat_map(|body| children_named(body, &["tr"]))
                .map(table_row)
                .collect();
            HtmlTable::new(rows)
        })
        .collect()
}

fn table_row(row: ElementRef<'_>) -> TableRow {
    let cells = children_named(row, &["td", "th"]).map(own_text).collect();
    let heading = row
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .map(own_text)
        .find(|text| !text.is_empty());
    TableRow { cells, heading }
}

fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .map_while(|child| child.value().as_text().map(|text| String::from(&**text)))
        .collect::<String>()
        .trim()
        .to_string()
}

fn descendants_named<'a>(
    root: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |element| element.value().name() == name)
}

fn children_named<'a>(
    parent: ElementRef<'a>,
    names: &'static [&'static str],
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |element| names.contains(&element.value().name()))
}
