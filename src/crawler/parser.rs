//! Listing and detail page parsing
//!
//! Two pure extraction functions over fetched page text: one turns a
//! rubric listing page into the detail-page links it advertises, one turns
//! a book detail page into a structured record. A field that is missing
//! from the markup resolves to an empty value, never to an error.

use scraper::{Html, Selector};
use url::Url;

/// A detail-page link discovered on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRef {
    pub detail_url: Url,
}

/// The parsed contents of a book detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPage {
    /// Site-relative canonical detail link, e.g. `/b239/`
    pub canonical_path: String,

    pub title: String,
    pub author: String,

    /// Site-relative text download link; empty means the book has no
    /// downloadable text and is excluded from the harvest entirely
    pub text_path: String,

    /// Site-relative cover image link
    pub image_path: String,

    pub comments: Vec<String>,
    pub genres: Vec<String>,
}

impl BookPage {
    pub fn has_text(&self) -> bool {
        !self.text_path.is_empty()
    }
}

/// Extracts every book detail link from a rubric listing page
///
/// Order follows the document; duplicates are kept as-is. Relative links
/// are resolved against the site root.
pub fn parse_listing(html: &str, root: &Url) -> Vec<BookRef> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("table.d_book div.bookimage a[href^='/b']") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| root.join(href).ok())
        .map(|detail_url| BookRef { detail_url })
        .collect()
}

/// Extracts the structured record from a book detail page
///
/// The site puts a `"::"` token inside raw titles as a formatting
/// artifact; it is replaced by two spaces before trimming.
pub fn parse_detail(html: &str) -> BookPage {
    let document = Html::parse_document(html);

    let title = heading_own_text(&document)
        .replace("::", "  ")
        .trim()
        .to_string();

    BookPage {
        canonical_path: first_attr(&document, "div.bookimage a", "href"),
        title,
        author: first_text(&document, "h1 a"),
        text_path: first_attr(&document, "a[href^='/txt.php']", "href"),
        image_path: first_attr(&document, "div.bookimage a img", "src"),
        comments: all_texts(&document, "div.texts span.black"),
        genres: all_texts(&document, "span.d_book a"),
    }
}

/// Reads the rubric's page count from a listing page's pager widget
///
/// The pager shows the current page in `span.npage_select b` and the
/// reachable pages as `a.npage` links, the last of which is the maximum.
/// If both are numeric the result is `max(current, max)`, covering a
/// pager whose last link is smaller than the page it is shown on.
/// Anything else defaults to a single page.
pub fn discover_max_page(html: &str) -> u32 {
    let document = Html::parse_document(html);

    let current = first_text(&document, "span.npage_select b");
    let last = all_texts(&document, "a.npage").pop().unwrap_or_default();

    match (current.parse::<u32>(), last.parse::<u32>()) {
        (Ok(current), Ok(last)) => current.max(last).max(1),
        _ => 1,
    }
}

/// First matching element's attribute value, or empty
fn first_attr(document: &Html, selector: &str, attr: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

/// First matching element's trimmed text, or empty
fn first_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of every matching element, empties dropped
fn all_texts(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Direct text of the `<h1>` heading, excluding nested elements
///
/// The heading holds the title as bare text and the author inside a link;
/// taking only the heading's own text nodes keeps the author out of the
/// title.
fn heading_own_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("h1") else {
        return String::new();
    };
    let Some(heading) = document.select(&selector).next() else {
        return String::new();
    };
    heading
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect()
}
