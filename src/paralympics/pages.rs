//! Server-rendered pages of the paralympics app.

use crate::utils::escape_html;
use entity::event;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Paralympics</a></nav>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        body = body
    )
}

/// `Barcelona 1992`
fn event_name(ev: &event::Model) -> String {
    format!("{} {}", ev.location, ev.year)
}

pub fn index(events: &[event::Model]) -> String {
    let mut body = String::from("<h1>Paralympic Games</h1>\n<ul id=\"event-list\">\n");
    for ev in events {
        body.push_str(&format!(
            "<li><a href=\"/display_event/{id}\" id=\"event-{id}\">{name}</a> ({kind})</li>\n",
            id = ev.event_id,
            name = escape_html(&event_name(ev)),
            kind = escape_html(&ev.event_type)
        ));
    }
    body.push_str("</ul>");
    layout("Paralympics Home", &body)
}

pub fn event(ev: &event::Model) -> String {
    let name = event_name(ev);
    let row = |label: &str, value: &str| {
        format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            label,
            escape_html(value)
        )
    };

    let mut body = format!("<h1>{}</h1>\n<table>\n", escape_html(&name));
    body.push_str(&row("Type", &ev.event_type));
    body.push_str(&row("Host NOC", &ev.noc));
    body.push_str(&row("Dates", &format!("{} to {}", ev.start, ev.end)));
    if let (Some(lat), Some(lon)) = (&ev.lat, &ev.lon) {
        body.push_str(&row("Location", &format!("{}, {}", lat, lon)));
    }
    body.push_str(&row("Disabilities included", &ev.disabilities_included));
    body.push_str(&row("Events", &ev.events.to_string()));
    body.push_str(&row("Sports", &ev.sports.to_string()));
    body.push_str(&row("Countries", &ev.countries.to_string()));
    body.push_str(&row(
        "Participants",
        &format!("{} ({} male, {} female)", ev.participants, ev.male, ev.female),
    ));
    body.push_str("</table>\n");
    if let Some(highlights) = &ev.highlights {
        body.push_str(&format!("<p id=\"highlights\">{}</p>\n", escape_html(highlights)));
    }
    layout(&name, &body)
}
