//! iCalendar serializer.
//!
//! Produces CRLF line endings and folds at 75 octets per RFC 5545 §3.1.

use chrono::{DateTime, Days, NaiveDate, Utc};
use suriya_core::{calday::CalDay, event::CalendarEvent};
use uuid::Uuid;

use crate::CalendarMeta;

// ─── RFC 5545 line folding ───────────────────────────────────────────────────

/// Emit `s` as one logical line, folding at 75 octets with CRLF + SP continuation.
pub(crate) fn fold_line(s: &str) -> String {
  if s.len() <= 75 {
    return format!("{s}\r\n");
  }

  let mut result = String::new();
  let total = s.len();
  let mut pos = 0usize;
  let mut first = true;

  while pos < total {
    // the continuation space counts towards the limit
    let limit = if first { 75 } else { 74 };
    let end = if pos + limit >= total {
      total
    } else {
      let mut e = pos + limit;
      while e > pos && !s.is_char_boundary(e) {
        e -= 1;
      }
      if e == pos { pos + 1 } else { e }
    };

    if !first {
      result.push(' ');
    }
    result.push_str(&s[pos..end]);
    result.push_str("\r\n");
    pos = end;
    first = false;
  }

  result
}

/// Escape a TEXT value: `\`, `;`, `,`, newlines.
fn escape_text(s: &str) -> String {
  s.replace('\\', "\\\\")
    .replace(';', "\\;")
    .replace(',', "\\,")
    .replace('\n', "\\n")
}

fn format_date(d: NaiveDate) -> String { d.format("%Y%m%d").to_string() }

fn format_stamp(t: DateTime<Utc>) -> String { t.format("%Y%m%dT%H%M%SZ").to_string() }

// ─── Components ──────────────────────────────────────────────────────────────

fn calendar_header(meta: &CalendarMeta) -> String {
  let mut out = String::new();
  out.push_str("BEGIN:VCALENDAR\r\n");
  out.push_str("VERSION:2.0\r\n");
  out.push_str(&fold_line(&format!("PRODID:{}", escape_text(&meta.prod_id))));
  if let Some(url) = &meta.url {
    out.push_str(&fold_line(&format!("URL:{url}")));
  }
  out.push_str(&fold_line(&format!("NAME:{}", escape_text(&meta.name))));
  out.push_str(&fold_line(&format!("X-WR-CALNAME:{}", escape_text(&meta.name))));
  out.push_str(&fold_line(&format!("DESCRIPTION:{}", escape_text(&meta.description))));
  out.push_str(&fold_line(&format!("X-WR-CALDESC:{}", escape_text(&meta.description))));
  out.push_str(&fold_line(&format!(
    "REFRESH-INTERVAL;VALUE=DURATION:{}",
    meta.refresh_interval
  )));
  out.push_str(&fold_line(&format!("X-PUBLISHED-TTL:{}", meta.refresh_interval)));
  out.push_str(&fold_line(&format!("COLOR:{}", meta.color)));
  out.push_str("CALSCALE:GREGORIAN\r\n");
  out.push_str("METHOD:PUBLISH\r\n");
  out
}

/// One all-day event ending the next day.
fn vevent(event: &CalendarEvent, dtstamp: &str) -> String {
  let date = event.date();
  let end = date + Days::new(1);

  let mut out = String::new();
  out.push_str("BEGIN:VEVENT\r\n");
  out.push_str(&fold_line(&format!("UID:{}", Uuid::new_v4())));
  out.push_str(&fold_line(&format!("DTSTAMP:{dtstamp}")));
  out.push_str(&fold_line(&format!("DTSTART;VALUE=DATE:{}", format_date(date))));
  out.push_str(&fold_line(&format!("DTEND;VALUE=DATE:{}", format_date(end))));
  out.push_str(&fold_line(&format!("SUMMARY:{}", escape_text(&event.summary()))));

  let description = match event {
    CalendarEvent::Major(e) => Some(&e.description),
    CalendarEvent::Note(n) => Some(&n.description),
    _ => None,
  };
  if let Some(description) = description
    && !description.is_empty()
    && *description != event.summary()
  {
    out.push_str(&fold_line(&format!("DESCRIPTION:{}", escape_text(description))));
  }

  out.push_str("END:VEVENT\r\n");
  out
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Serialize `days` as an iCalendar string, stamped with the current time.
pub fn serialize(days: &[CalDay], meta: &CalendarMeta) -> String {
  serialize_at(days, meta, Utc::now())
}

/// Serialize `days` with every `DTSTAMP` set to `dtstamp`.
pub fn serialize_at(days: &[CalDay], meta: &CalendarMeta, dtstamp: DateTime<Utc>) -> String {
  let stamp = format_stamp(dtstamp);

  let mut out = calendar_header(meta);
  for day in days {
    for event in day.calendar_events() {
      if matches!(event, CalendarEvent::Astro(_)) {
        continue;
      }
      out.push_str(&vevent(&event, &stamp));
    }
  }
  out.push_str("END:VCALENDAR\r\n");
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use suriya_core::{
    Almanac,
    calday::cal_days,
    event::{Annotation, HolidayEvent},
    feed::{AstroMoon, MemoryFeed, NoFeed},
    uposatha::{CalendarVariant, Phase},
  };

  use super::*;

  fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
  }

  fn stamp() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap() }

  fn count(haystack: &str, needle: &str) -> usize { haystack.matches(needle).count() }

  // ── Envelope ──────────────────────────────────────────────────────────────

  #[test]
  fn header_carries_calendar_properties() {
    let out = serialize_at(&[], &CalendarMeta::default(), stamp());
    assert!(out.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(out.contains("PRODID:Uposatha Moondays Mahānikāya EN\r\n"), "got:\n{out}");
    assert!(out.contains("URL:http://splendidmoons.github.io/ical/mahanikaya.ical\r\n"));
    assert!(out.contains("X-WR-CALNAME:Uposatha Moondays (Mahānikāya)\r\n"));
    assert!(out.contains("REFRESH-INTERVAL;VALUE=DURATION:PT12H\r\n"));
    assert!(out.contains("X-PUBLISHED-TTL:PT12H\r\n"));
    assert!(out.contains("COLOR:244:196:48\r\n"));
    assert!(out.contains("CALSCALE:GREGORIAN\r\n"));
    assert!(out.contains("METHOD:PUBLISH\r\n"));
    assert!(out.ends_with("END:VCALENDAR\r\n"));
    assert_eq!(count(&out, "BEGIN:VEVENT"), 0);
  }

  #[test]
  fn custom_name() {
    let meta = CalendarMeta::default().with_name("Moondays, Thailand");
    let out = serialize_at(&[], &meta, stamp());
    assert!(out.contains("NAME:Moondays\\, Thailand\r\n"), "got:\n{out}");
    assert!(out.contains("DESCRIPTION:Moondays\\, Thailand\r\n"));
  }

  // ── Events ────────────────────────────────────────────────────────────────

  #[test]
  fn all_day_event_ends_next_day() {
    let date = ymd(2015, 12, 31);
    let mut day = CalDay::new(date);
    CalendarEvent::from(HolidayEvent::new(date, CalendarVariant::Mahanikaya, "Kathina"))
      .attach_to(&mut day);

    let out = serialize_at(&[day], &CalendarMeta::default(), stamp());
    assert_eq!(count(&out, "BEGIN:VEVENT\r\n"), 1);
    assert!(out.contains("DTSTAMP:20240115T120000Z\r\n"));
    assert!(out.contains("DTSTART;VALUE=DATE:20151231\r\n"));
    assert!(out.contains("DTEND;VALUE=DATE:20160101\r\n"));
    assert!(out.contains("SUMMARY:Kathina\r\n"));
    // summary and description are the same
    assert!(!out.contains("\r\nDESCRIPTION:Kathina"));
  }

  #[test]
  fn astro_moons_are_not_exported() {
    let date = ymd(2015, 7, 31);
    let mut day = CalDay::new(date);
    CalendarEvent::from(AstroMoon {
      date,
      phase: Phase::Full,
    })
    .attach_to(&mut day);

    let out = serialize_at(&[day], &CalendarMeta::default(), stamp());
    assert_eq!(count(&out, "BEGIN:VEVENT"), 0);
  }

  #[test]
  fn notes_keep_their_description() {
    let date = ymd(2015, 11, 1);
    let mut day = CalDay::new(date);
    CalendarEvent::from(Annotation {
      date,
      calendar: CalendarVariant::Mahanikaya,
      summary: "Kathina".to_string(),
      description: "Robe offering; all welcome".to_string(),
    })
    .attach_to(&mut day);

    let out = serialize_at(&[day], &CalendarMeta::default(), stamp());
    assert!(out.contains("DESCRIPTION:Robe offering\\; all welcome\r\n"), "got:\n{out}");
  }

  #[test]
  fn one_event_per_record() {
    let almanac = Almanac::default();
    let from = ymd(2015, 7, 1);
    let to = ymd(2015, 7, 31);
    let feed = MemoryFeed {
      moons: vec![AstroMoon {
        date:  ymd(2015, 7, 31),
        phase: Phase::Full,
      }],
    };
    let days = cal_days(&almanac, from, to, &feed);
    let records: usize = days
      .iter()
      .map(|d| {
        d.calendar_events()
          .iter()
          .filter(|e| !matches!(e, CalendarEvent::Astro(_)))
          .count()
      })
      .sum();

    let out = serialize_at(&days, &CalendarMeta::default(), stamp());
    assert!(records > 0);
    assert_eq!(count(&out, "BEGIN:VEVENT"), records);
    assert_eq!(count(&out, "END:VEVENT"), records);
    assert!(out.contains("SUMMARY:Āsāḷha Pūjā\r\n"));
    assert!(out.contains("SUMMARY:First day of Vassa\r\n"));
  }

  #[test]
  fn uids_are_unique() {
    let almanac = Almanac::default();
    let days = cal_days(&almanac, ymd(2015, 1, 1), ymd(2015, 3, 31), &NoFeed);
    let out = serialize_at(&days, &CalendarMeta::default(), stamp());
    let uids: Vec<&str> = out.lines().filter(|l| l.starts_with("UID:")).collect();
    let mut unique = uids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(uids.len(), unique.len());
  }

  // ── Line folding ──────────────────────────────────────────────────────────

  #[test]
  fn long_lines_are_folded() {
    let meta = CalendarMeta::default().with_name("Ā".repeat(100));
    let out = serialize_at(&[], &meta, stamp());
    for physical_line in out.split("\r\n").filter(|l| !l.is_empty()) {
      assert!(
        physical_line.len() <= 75,
        "physical line too long ({} bytes): {:?}",
        physical_line.len(),
        physical_line
      );
    }
  }

  #[test]
  fn folding_is_reversible() {
    let line = format!("SUMMARY:{}", "Pavāraṇā ".repeat(20));
    let folded = fold_line(&line);
    assert_eq!(folded.replace("\r\n ", ""), format!("{line}\r\n"));
  }

  #[test]
  fn short_lines_are_untouched() {
    assert_eq!(fold_line("METHOD:PUBLISH"), "METHOD:PUBLISH\r\n");
  }
}
