//! CLI output formatting for the feed, album detail, and publish progress.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not payload-centric**. The primary
//! display for every album is its semantic identity — positional index,
//! title, category — with payload details (data URI sizes, placeholder
//! tokens) shown as secondary context on indented lines.
//!
//! # Output Format
//!
//! ## Feed (`list`)
//!
//! ```text
//! Albums
//! 001 Summer Trip (travel, 3 items)
//!     Published: 2026-07-14T09:30:00+00:00
//!     Layout: grid, 3 columns, gap 2
//! 002 Garden (nature, 5 items) [hidden]
//!     Published: 2026-07-15T18:02:11+00:00
//!     Layout: scrapbook, 2 columns, gap 4
//! ```
//!
//! ## Album detail (`show`)
//!
//! ```text
//! Summer Trip (travel)
//!     Id: album-1752485400000-9f3a2c1b
//!     Published: 2026-07-14T09:30:00+00:00
//!     Layout: scrapbook, 3 columns, gap 2
//!     Background: bg-amber-50
//!     Media
//!     001 image (data URI, 48213 bytes)
//!         Rotation: -8deg
//!         Border: border-4 border-white shadow-lg
//!     002 video (placeholder)
//!         Rotation: -5deg
//!         Border: border-4 border-yellow-100 shadow-lg
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::album::{Album, Category, Layout, MediaKind};
use crate::layout::{container_class, style_for};
use crate::publish::PublishEvent;
use crate::resize::decode_data_uri;
use crate::staging::StagedMedia;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
///
/// Counts characters, not bytes — descriptions are arbitrary user text and a
/// byte slice could split a multibyte character.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max).collect();
        format!("{prefix}...")
    }
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Personal => "personal",
        Category::Family => "family",
        Category::Travel => "travel",
        Category::Events => "events",
        Category::Nature => "nature",
        Category::Other => "other",
    }
}

fn layout_label(layout: Layout) -> &'static str {
    match layout {
        Layout::Grid => "grid",
        Layout::Masonry => "masonry",
        Layout::Rows => "rows",
        Layout::Columns => "columns",
        Layout::Scrapbook => "scrapbook",
    }
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

/// Payload summary for a media entry: data URIs show their decoded payload
/// size, everything else is a placeholder token.
fn payload_summary(data: &str) -> String {
    match decode_data_uri(data) {
        Ok((_, bytes)) => format!("data URI, {} bytes", bytes.len()),
        Err(_) => "placeholder".to_string(),
    }
}

// ============================================================================
// Staging summary
// ============================================================================

/// Format the staged entries about to be published, in album order.
///
/// ```text
///     001 beach.jpg (image)
///     002 clip.mp4 (video)
/// ```
pub fn format_staged(entries: &[StagedMedia]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "    {} {} ({})",
                format_index(i + 1),
                entry.name,
                kind_label(entry.kind)
            )
        })
        .collect()
}

/// Print the staging summary to stdout.
pub fn print_staged(entries: &[StagedMedia]) {
    for line in format_staged(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Feed listing
// ============================================================================

/// Format the album feed, newest entries last (catalog insertion order).
///
/// Hidden albums are skipped unless `show_hidden` is set; when shown they
/// carry a `[hidden]` marker.
pub fn format_feed(albums: &[Album], show_hidden: bool) -> Vec<String> {
    let mut lines = vec!["Albums".to_string()];

    let mut position = 0;
    for album in albums {
        if album.hidden && !show_hidden {
            continue;
        }
        position += 1;

        let marker = if album.hidden { " [hidden]" } else { "" };
        lines.push(format!(
            "{} {} ({}, {} items){}",
            format_index(position),
            album.title,
            category_label(album.category),
            album.media_count,
            marker
        ));
        lines.push(format!("    Published: {}", album.published_at));
        lines.push(format!(
            "    Layout: {}, {} columns, gap {}",
            layout_label(album.layout),
            album.columns,
            album.gap
        ));
        if !album.description.is_empty() {
            lines.push(format!(
                "    {}",
                truncate_desc(album.description.trim(), 60)
            ));
        }
    }

    if position == 0 {
        lines.push("    (no albums)".to_string());
    }
    lines
}

/// Print the feed to stdout.
pub fn print_feed(albums: &[Album], show_hidden: bool) {
    for line in format_feed(albums, show_hidden) {
        println!("{}", line);
    }
}

// ============================================================================
// Album detail
// ============================================================================

/// Format a single album in full: settings, container class, and every media
/// entry with its derived per-item style.
pub fn format_album_detail(album: &Album) -> Vec<String> {
    let mut lines = Vec::new();

    let marker = if album.hidden { " [hidden]" } else { "" };
    lines.push(format!(
        "{} ({}){}",
        album.title,
        category_label(album.category),
        marker
    ));
    lines.push(format!("    Id: {}", album.id));
    lines.push(format!("    Published: {}", album.published_at));
    lines.push(format!(
        "    Layout: {}, {} columns, gap {}",
        layout_label(album.layout),
        album.columns,
        album.gap
    ));
    lines.push(format!("    Background: {}", album.background));
    lines.push(format!(
        "    Container: {}",
        container_class(album.layout, album.columns, album.gap)
    ));
    if !album.description.is_empty() {
        lines.push(format!("    Description: {}", album.description.trim()));
    }

    lines.push("    Media".to_string());
    for entry in &album.media {
        lines.push(format!(
            "    {} {} ({})",
            format_index(entry.index + 1),
            kind_label(entry.kind),
            payload_summary(&entry.data)
        ));

        let style = style_for(album.layout, entry.index);
        if style.rotation_degrees != 0 {
            lines.push(format!("        Rotation: {}deg", style.rotation_degrees));
        }
        if let Some(border) = style.border {
            lines.push(format!("        Border: {}", border.class()));
        }
    }
    lines
}

/// Print one album in full to stdout.
pub fn print_album_detail(album: &Album) {
    for line in format_album_detail(album) {
        println!("{}", line);
    }
}

// ============================================================================
// Publish progress
// ============================================================================

/// Format a single publish progress event as display lines.
pub fn format_publish_event(event: &PublishEvent) -> Vec<String> {
    match event {
        PublishEvent::Resizing { total } => {
            vec![format!("Resizing {} items", total)]
        }
        PublishEvent::ItemResized { index } => {
            vec![format!("    {} resized", format_index(index + 1))]
        }
        PublishEvent::ItemDegraded { index } => {
            vec![format!(
                "    {} could not be processed, using placeholder",
                format_index(index + 1)
            )]
        }
        PublishEvent::Persisting => vec!["Saving album".to_string()],
        PublishEvent::DegradedRetry => {
            vec!["Storage full, retrying with placeholder media".to_string()]
        }
        PublishEvent::Published { album_id, degraded } => {
            if *degraded {
                vec![format!(
                    "Published {} (reduced quality due to storage limits)",
                    album_id
                )]
            } else {
                vec![format!("Published {}", album_id)]
            }
        }
    }
}

/// Print one publish event to stdout.
pub fn print_publish_event(event: &PublishEvent) {
    for line in format_publish_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
