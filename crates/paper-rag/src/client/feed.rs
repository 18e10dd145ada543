//! Atom feed parsing for arXiv query responses.
//!
//! arXiv answers every query with an Atom feed. Entries carry the paper
//! metadata; `arxiv:`-prefixed elements add categories, DOI and comments,
//! and `opensearch:totalResults` reports the total match count.

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ClientError, ClientResult};
use crate::models::{Author, Link, Paper};

/// A parsed query response.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    /// Total number of matches reported by arXiv.
    pub total_results: Option<u64>,

    /// Entries in feed order.
    pub entries: Vec<Paper>,
}

/// Text-bearing elements we collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    TotalResults,
    Id,
    Title,
    Summary,
    Published,
    Updated,
    AuthorName,
    Affiliation,
    Comment,
    JournalRef,
    Doi,
}

/// Parse an arXiv Atom feed.
///
/// Elements are matched by local name, so namespace prefixes do not matter.
///
/// # Errors
///
/// Returns `ClientError::Feed` on malformed XML, bad dates, or an unterminated entry.
pub fn parse_feed(xml: &str) -> ClientResult<Feed> {
    let mut reader = Reader::from_str(xml);
    let mut feed = Feed::default();
    let mut entry: Option<Paper> = None;
    let mut author: Option<Author> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(ClientError::feed)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"entry" => entry = Some(Paper::default()),
                b"author" if entry.is_some() => author = Some(Author::default()),
                b"link" | b"category" | b"primary_category" => {
                    if let Some(paper) = entry.as_mut() {
                        apply_attributes(paper, &e)?;
                    }
                }
                name => {
                    field = field_for(name, entry.is_some(), author.is_some());
                    text.clear();
                }
            },
            Event::Empty(e) => {
                if let Some(paper) = entry.as_mut() {
                    apply_attributes(paper, &e)?;
                }
            }
            Event::Text(t) => {
                if field.is_some() {
                    text.push_str(&t.unescape().map_err(ClientError::feed)?);
                }
            }
            Event::CData(c) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(paper) = entry.take() {
                        feed.entries.push(paper);
                    }
                }
                b"author" => {
                    if let (Some(paper), Some(a)) = (entry.as_mut(), author.take()) {
                        paper.authors.push(a);
                    }
                }
                _ => {
                    if let Some(f) = field.take() {
                        assign(&mut feed, entry.as_mut(), author.as_mut(), f, &text)?;
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if entry.is_some() {
        return Err(ClientError::feed("feed ended inside an entry"));
    }

    Ok(feed)
}

fn field_for(name: &[u8], in_entry: bool, in_author: bool) -> Option<Field> {
    if !in_entry {
        return (name == b"totalResults").then_some(Field::TotalResults);
    }

    match name {
        b"name" if in_author => Some(Field::AuthorName),
        b"affiliation" if in_author => Some(Field::Affiliation),
        b"id" => Some(Field::Id),
        b"title" => Some(Field::Title),
        b"summary" => Some(Field::Summary),
        b"published" => Some(Field::Published),
        b"updated" => Some(Field::Updated),
        b"comment" => Some(Field::Comment),
        b"journal_ref" => Some(Field::JournalRef),
        b"doi" => Some(Field::Doi),
        _ => None,
    }
}

fn assign(
    feed: &mut Feed,
    entry: Option<&mut Paper>,
    author: Option<&mut Author>,
    field: Field,
    text: &str,
) -> ClientResult<()> {
    let value = text.trim();

    if field == Field::TotalResults {
        feed.total_results = value.parse().ok();
        return Ok(());
    }

    let Some(paper) = entry else {
        return Ok(());
    };

    match field {
        Field::Id => paper.entry_id = value.to_string(),
        Field::Title => paper.title = collapse_whitespace(value),
        Field::Summary => paper.summary = value.to_string(),
        Field::Published => paper.published = Some(parse_timestamp(value)?),
        Field::Updated => paper.updated = Some(parse_timestamp(value)?),
        Field::AuthorName => {
            if let Some(a) = author {
                a.name = value.to_string();
            }
        }
        Field::Affiliation => {
            if let Some(a) = author {
                a.affiliation = Some(value.to_string());
            }
        }
        Field::Comment => paper.comment = Some(value.to_string()),
        Field::JournalRef => paper.journal_ref = Some(value.to_string()),
        Field::Doi => paper.doi = Some(value.to_string()),
        Field::TotalResults => {}
    }

    Ok(())
}

/// Record `link`, `category` and `primary_category` attributes on an entry.
fn apply_attributes(paper: &mut Paper, e: &BytesStart<'_>) -> ClientResult<()> {
    match e.local_name().as_ref() {
        b"link" => {
            if let Some(href) = attribute(e, "href")? {
                paper.links.push(Link {
                    href,
                    rel: attribute(e, "rel")?,
                    title: attribute(e, "title")?,
                    content_type: attribute(e, "type")?,
                });
            }
        }
        b"category" => {
            if let Some(term) = attribute(e, "term")? {
                paper.categories.push(term);
            }
        }
        b"primary_category" => paper.primary_category = attribute(e, "term")?,
        _ => {}
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, key: &str) -> ClientResult<Option<String>> {
    match e.try_get_attribute(key).map_err(ClientError::feed)? {
        Some(attr) => Ok(Some(attr.unescape_value().map_err(ClientError::feed)?.into_owned())),
        None => Ok(None),
    }
}

fn parse_timestamp(value: &str) -> ClientResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ClientError::feed(format!("invalid timestamp '{value}': {e}")))
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
