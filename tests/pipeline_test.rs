//! Integration tests for layout reconstruction and Markdown rendering.

use pagemd::layout::{layout_page, Element, LayoutOptions};
use pagemd::render::{to_markdown, to_markdown_with_stats, RenderOptions, PAGE_SEPARATOR};
use pagemd::{render_document, Document, PagePrimitives, TableRegion, Word};

fn words(page: PagePrimitives, items: &[(&str, f64, f64)]) -> PagePrimitives {
    items
        .iter()
        .fold(page, |page, (text, x0, top)| page.with_word(Word::new(*text, *x0, *top)))
}

/// An invoice-like page: heading, a table with its own words on the page,
/// and a footer, with words delivered out of order.
fn invoice_page(number: u32) -> PagePrimitives {
    let page = words(
        PagePrimitives::letter(number),
        &[
            ("Thanks", 72.0, 700.0),
            ("Invoice", 72.0, 40.0),
            ("2024-01", 140.0, 40.02),
            ("Item", 72.0, 120.0),
            ("Price", 300.0, 120.0),
            ("Widget", 72.0, 140.0),
            ("$5", 300.0, 140.0),
            ("for", 130.0, 700.0),
            ("shopping", 160.0, 700.0),
        ],
    );
    page.with_table(TableRegion::new(
        (70.0, 120.0, 360.0, 160.0),
        vec![
            vec![Some("Item".into()), Some("Price".into())],
            vec![Some("Widget".into()), Some("$5".into())],
            vec![Some("Gadget\nDeluxe".into()), None],
        ],
    ))
}

#[test]
fn test_hello_world() {
    let doc = Document::from_pages(vec![
        PagePrimitives::letter(1).with_word(Word::new("Hello", 0.0, 0.0))
    ]);
    assert_eq!(render_document(&doc).unwrap(), "Hello  \n");
}

#[test]
fn test_invoice_page() {
    let doc = Document::from_pages(vec![invoice_page(1)]);
    assert_eq!(
        render_document(&doc).unwrap(),
        "Invoice 2024-01  \n\
         | Item | Price |\n\
         | --- | --- |\n\
         | Widget | $5 |\n\
         | Gadget<br>Deluxe |  |\n\
         \n\
         Thanks for shopping  \n"
    );
}

#[test]
fn test_elements_ordered_and_table_words_excluded() {
    let page = invoice_page(1);
    let elements = layout_page(&page, &LayoutOptions::default());

    let anchors: Vec<f64> = elements.iter().map(Element::y).collect();
    assert!(anchors.windows(2).all(|w| w[0] <= w[1]), "{:?}", anchors);

    for element in &elements {
        if let Element::TextLine { text, .. } = element {
            assert!(!text.contains("Widget"), "table word leaked: {}", text);
            assert!(!text.contains("Price"), "table word leaked: {}", text);
        }
    }
}

#[test]
fn test_table_precedes_line_at_same_anchor() {
    let page = PagePrimitives::letter(1)
        .with_word(Word::new("beside", 400.0, 100.0))
        .with_table(TableRegion::from_strings(
            (10.0, 100.0, 200.0, 150.0),
            [vec!["H"], vec!["v"]],
        ));
    let markdown = render_document(&Document::from_pages(vec![page])).unwrap();
    assert_eq!(markdown, "| H |\n| --- |\n| v |\n\nbeside  \n");
}

#[test]
fn test_word_on_table_edge_is_excluded() {
    let page = PagePrimitives::letter(1)
        .with_word(Word::new("edge", 200.0, 150.0))
        .with_word(Word::new("outside", 200.1, 150.0))
        .with_table(TableRegion::from_strings(
            (10.0, 100.0, 200.0, 150.0),
            [vec!["A"]],
        ));
    let markdown = render_document(&Document::from_pages(vec![page])).unwrap();
    assert!(!markdown.contains("edge"));
    assert!(markdown.contains("outside"));
}

#[test]
fn test_separators_between_pages() {
    for n in 0..5u32 {
        let doc = Document::from_pages((1..=n).map(invoice_page).collect());
        let markdown = render_document(&doc).unwrap();
        assert_eq!(
            markdown.matches(PAGE_SEPARATOR).count(),
            n.saturating_sub(1) as usize
        );
    }
}

#[test]
fn test_empty_page_between_pages() {
    let doc = Document::from_pages(vec![
        PagePrimitives::letter(1).with_word(Word::new("a", 0.0, 0.0)),
        PagePrimitives::letter(2),
        PagePrimitives::letter(3).with_word(Word::new("c", 0.0, 0.0)),
    ]);
    assert_eq!(
        render_document(&doc).unwrap(),
        "a  \n  \n---  \n  \n---  \nc  \n"
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = Document::from_pages((1..=20).map(invoice_page).collect());
    let layout = LayoutOptions::default();
    let first = to_markdown(&doc, &layout, &RenderOptions::default()).unwrap();
    let again = to_markdown(&doc, &layout, &RenderOptions::default()).unwrap();
    let sequential = to_markdown(&doc, &layout, &RenderOptions::new().sequential()).unwrap();
    assert_eq!(first, again);
    assert_eq!(first, sequential);
}

#[test]
fn test_coarser_precision_merges_lines() {
    let page = words(
        PagePrimitives::letter(1),
        &[("low", 50.0, 10.3), ("high", 0.0, 9.8)],
    );
    let doc = Document::from_pages(vec![page]);

    let fine = to_markdown(&doc, &LayoutOptions::default(), &RenderOptions::default()).unwrap();
    assert_eq!(fine, "high  \nlow  \n");

    let coarse = LayoutOptions::new().with_line_precision(0);
    let merged = to_markdown(&doc, &coarse, &RenderOptions::default()).unwrap();
    assert_eq!(merged, "high low  \n");
}

#[test]
fn test_stats() {
    let doc = Document::from_pages(vec![invoice_page(1), invoice_page(2)]);
    let result =
        to_markdown_with_stats(&doc, &LayoutOptions::default(), &RenderOptions::default()).unwrap();

    assert_eq!(result.stats.page_count, 2);
    assert_eq!(result.stats.table_count, 2);
    assert_eq!(result.stats.line_count, 4);
    assert_eq!(result.stats.paragraph_count, 4);
    assert_eq!(result.content_len(), result.content.len());
}

#[test]
fn test_exact_ties_round_to_even_when_grouping() {
    let split = words(PagePrimitives::letter(1), &[("a", 0.0, 10.25), ("b", 20.0, 10.26)]);
    let elements = layout_page(&split, &LayoutOptions::default());
    assert_eq!(elements.len(), 2);
    assert_eq!(
        render_document(&Document::from_pages(vec![split])).unwrap(),
        "a  \nb  \n"
    );

    let merged = words(PagePrimitives::letter(1), &[("a", 0.0, 10.25), ("b", 20.0, 10.24)]);
    assert_eq!(
        render_document(&Document::from_pages(vec![merged])).unwrap(),
        "a b  \n"
    );
}
