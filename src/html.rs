//! Standalone HTML snapshot of the chat view.
//!
//! Used by `/export`.  Every piece of text is passed through
//! [`escape_html`], so the document never contains markup that came from a
//! message or a listing.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::listing::{ListingCard, ListingPanel, NO_RESULTS, PanelContent};
use crate::markup::escape_html;
use crate::transcript::{ChatTurn, Transcript, WelcomeBlock};

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto}\
.message{display:flex;gap:.5rem;margin:.5rem 0}\
.message.user{flex-direction:row-reverse}\
.message-time{color:#888;font-size:.8rem}\
.property-card{border:1px solid #ddd;border-radius:8px;padding:1rem;margin:.5rem 0}\
.feature-badge{background:#eef;border-radius:4px;padding:0 .4rem;margin-right:.3rem}";

/// Renders the transcript and, when it is showing, the listing panel.
pub fn render_document(transcript: &Transcript, panel: &ListingPanel) -> String {
    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    doc.push_str("<title>propchat</title>\n");
    let _ = writeln!(doc, "<style>{STYLE}</style>");
    doc.push_str("</head>\n<body>\n<div id=\"chat-container\">\n");
    if let Some(welcome) = transcript.welcome() {
        doc.push_str(&welcome_html(welcome));
    }
    for turn in transcript.turns() {
        doc.push_str(&turn_html(turn));
    }
    doc.push_str("</div>\n");
    if panel.is_visible() {
        doc.push_str(&panel_html(panel));
    }
    doc.push_str("</body>\n</html>\n");
    doc
}

/// Writes [`render_document`] to `path`.
pub fn export<P: AsRef<Path>>(path: P, transcript: &Transcript, panel: &ListingPanel) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_document(transcript, panel))
        .map_err(|err| Error::io(format!("failed to write {}", path.display()), err))
}

fn welcome_html(welcome: &WelcomeBlock) -> String {
    let mut html = String::from("<div class=\"welcome-message\">\n");
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(welcome.heading));
    let _ = writeln!(html, "<p>{}</p>", escape_html(welcome.intro));
    let _ = writeln!(
        html,
        "<p><strong>{}</strong></p>\n<ul>",
        escape_html(welcome.examples_heading)
    );
    for example in welcome.examples {
        let _ = writeln!(html, "<li>&quot;{}&quot;</li>", escape_html(example));
    }
    let _ = writeln!(html, "</ul>\n<p>{}</p>\n</div>", escape_html(welcome.prompt));
    html
}

fn turn_html(turn: &ChatTurn) -> String {
    format!(
        "<div class=\"message {}\">\n<div class=\"message-avatar\">{}</div>\n\
         <div class=\"message-content\">\n<div class=\"message-text\">{}</div>\n\
         <div class=\"message-time\">{}</div>\n</div>\n</div>\n",
        turn.sender.as_str(),
        turn.sender.avatar(),
        escape_html(&turn.text),
        turn.clock()
    )
}

fn panel_html(panel: &ListingPanel) -> String {
    let mut html = String::from("<div id=\"properties-list\">\n");
    match panel.content() {
        PanelContent::NoResults => {
            let _ = writeln!(html, "<div class=\"no-properties\">{NO_RESULTS}</div>");
        }
        PanelContent::Cards(cards) => {
            for card in cards {
                html.push_str(&card_html(card));
            }
        }
    }
    html.push_str("</div>\n");
    html
}

fn card_html(card: &ListingCard) -> String {
    let mut html = String::from("<div class=\"property-card\">\n");
    let _ = writeln!(
        html,
        "<div class=\"property-header\"><div class=\"property-title\">{}</div>\
         <div class=\"property-price\">{}</div></div>",
        escape_html(&card.title),
        escape_html(&card.price)
    );
    let _ = writeln!(
        html,
        "<div class=\"property-details\"><span>📐 {} m²</span> \
         <span>🛏️ {} dormitorios</span> <span>🚿 {} baños</span> \
         <span>🏗️ {}</span></div>",
        card.area,
        card.bedrooms,
        card.bathrooms,
        escape_html(&card.status)
    );
    if !card.badges.is_empty() {
        html.push_str("<div class=\"property-features\">");
        for badge in &card.badges {
            let _ = write!(
                html,
                "<span class=\"feature-badge\">{}</span>",
                escape_html(badge.label())
            );
        }
        html.push_str("</div>\n");
    }
    let _ = writeln!(
        html,
        "<div class=\"property-location\">📍 {}</div>\n</div>",
        escape_html(&card.district)
    );
    html
}
