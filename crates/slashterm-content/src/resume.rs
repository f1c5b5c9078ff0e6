//! The `resume` command and the resume data model.

use std::rc::Rc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use slashterm_core::quick::{QUICK_COMMANDS, QuickSet, RESUME_VARIATIONS, quick_commands};
use slashterm_core::{Command, CommandSuggestions, SuggestionItem};
use slashterm_types::{CommandResponse, Result, ShellError};

use crate::store::ContentStore;

/// Path of the resume document inside the content store.
pub const RESUME_PATH: &str = "resume.json";

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub contact: ResumeContact,
    #[serde(default)]
    pub experience: Vec<Position>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub meta: Option<ResumeMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub location: String,
    pub start_date: String,
    /// `None` or `"present"` for a current position.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    /// `full-time` or `consulting`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeMeta {
    pub version: String,
    pub updated: String,
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or `YYYY`. Missing parts default to the
/// first month or day.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d"))
        .ok()
}

impl Position {
    pub fn is_current(&self) -> bool {
        self.end_date
            .as_deref()
            .is_none_or(|d| d.trim().eq_ignore_ascii_case("present"))
    }

    /// Unparseable start dates sort before everything else.
    fn start(&self) -> NaiveDate {
        parse_date(&self.start_date).unwrap_or(NaiveDate::MIN)
    }

    /// Whether the position was held in or after `year`.
    pub fn active_since(&self, year: i32) -> bool {
        if self.is_current() {
            return true;
        }
        let end = self
            .end_date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(|| self.start());
        end.year() >= year
    }

    fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

const SECTIONS: &[(&str, &str)] = &[
    ("summary", "Show only the professional summary"),
    (
        "recent",
        "Show only current positions or most recent experience",
    ),
    ("skills", "Show only the skills section"),
    ("projects", "Show only the projects section"),
    ("full-time", "Show only full-time positions"),
    ("consulting", "Show only consulting engagements"),
];

#[derive(Debug, Default, PartialEq, Eq)]
struct ResumeArgs {
    section: Option<String>,
    since_year: Option<i32>,
    full_time_only: bool,
}

fn parse_args(args: &[String]) -> Result<ResumeArgs> {
    let mut out = ResumeArgs::default();
    let mut tokens = args.iter().map(|a| a.trim()).filter(|a| !a.is_empty());
    while let Some(tok) = tokens.next() {
        match tok {
            "--since-year" => {
                let raw = tokens.next().ok_or_else(|| {
                    ShellError::Command("--since-year expects a year".to_string())
                })?;
                let year = raw.parse().map_err(|_| {
                    ShellError::Command(format!("--since-year expects a year, got '{raw}'"))
                })?;
                out.since_year = Some(year);
            },
            "--full-time-only" => out.full_time_only = true,
            flag if flag.starts_with("--") => {
                return Err(ShellError::Command(format!("unknown option: {flag}")));
            },
            section if out.section.is_none() => out.section = Some(section.to_lowercase()),
            _ => {},
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// `Mar 2021` for dated entries, the bare year for year-only ones.
fn format_date(raw: &str) -> String {
    if raw.trim().eq_ignore_ascii_case("present") {
        return "Present".to_string();
    }
    match parse_date(raw) {
        Some(d) if raw.contains('-') => d.format("%b %Y").to_string(),
        Some(d) => d.format("%Y").to_string(),
        None => raw.to_string(),
    }
}

fn format_range(p: &Position) -> String {
    let end = p.end_date.as_deref().unwrap_or("present");
    format!("{} \u{2013} {}", format_date(&p.start_date), format_date(end))
}

fn header(r: &Resume) -> String {
    let mut out = format!("# {}\n## {}\n", r.name, r.title);
    let mut contact = Vec::new();
    if let Some(email) = &r.contact.email {
        contact.push(format!("\u{2709} {email}"));
    }
    if let Some(phone) = &r.contact.phone {
        contact.push(format!("\u{1f4de} {phone}"));
    }
    if let Some(gh) = &r.contact.github {
        contact.push(format!("\u{1f517} github.com/{gh}"));
    }
    if !contact.is_empty() {
        out.push_str(&contact.join(" \u{b7} "));
        out.push('\n');
    }
    out
}

fn summary_section(r: &Resume) -> String {
    format!("### Summary\n{}\n", r.summary)
}

fn experience_section(title: &str, positions: &[&Position]) -> String {
    if positions.is_empty() {
        return format!("### {title}\nNo experience matches your criteria.\n");
    }
    let mut out = format!("### {title}\n");
    for p in positions {
        out.push_str(&format!("**{}**", p.company));
        if p.is_kind("consulting") {
            out.push_str(" _(consulting)_");
        }
        out.push('\n');
        out.push_str(&p.position);
        if !p.location.is_empty() {
            out.push_str(&format!(" \u{b7} {}", p.location));
        }
        // Consulting engagements are listed without dates.
        if !p.is_kind("consulting") {
            out.push_str(&format!(" \u{b7} {}", format_range(p)));
        }
        out.push('\n');
        if !p.technologies.is_empty() {
            out.push_str(&format!("`{}`\n", p.technologies.join("` `")));
        }
        for line in &p.description {
            out.push_str(&format!("- {line}\n"));
        }
        out.push('\n');
    }
    out
}

fn skills_section(r: &Resume) -> String {
    let mut out = String::from("### Skills\n");
    for group in &r.skills {
        out.push_str(&format!("**{}**: {}\n", group.category, group.items.join(", ")));
    }
    out
}

fn education_section(r: &Resume) -> String {
    let mut out = String::from("### Education\n");
    for e in &r.education {
        out.push_str(&format!("**{}**\n{} in {}\n", e.institution, e.degree, e.field));
    }
    out
}

fn projects_section(r: &Resume) -> String {
    if r.projects.is_empty() {
        return String::new();
    }
    let mut out = String::from("### Projects\n");
    for p in &r.projects {
        out.push_str(&format!("**{}**\n{}\n", p.name, p.description));
        if !p.technologies.is_empty() {
            out.push_str(&format!("`{}`\n", p.technologies.join("` `")));
        }
        if let Some(url) = &p.url {
            out.push_str(&format!("Check it out: {url}\n"));
        }
        if let Some(gh) = &p.github {
            out.push_str(&format!("GitHub: {gh}\n"));
        }
        out.push('\n');
    }
    out
}

/// Current positions, or failing that the single most recent one.
fn recent<'a>(positions: &[&'a Position]) -> Vec<&'a Position> {
    let current: Vec<&Position> = positions.iter().copied().filter(|p| p.is_current()).collect();
    if !current.is_empty() {
        return current;
    }
    positions
        .iter()
        .copied()
        .max_by_key(|p| p.start())
        .into_iter()
        .collect()
}

fn render(r: &Resume, args: &ResumeArgs) -> String {
    let mut positions: Vec<&Position> = r.experience.iter().collect();
    if let Some(year) = args.since_year {
        positions.retain(|p| p.active_since(year));
    }
    if args.full_time_only {
        positions.retain(|p| p.is_kind("full-time"));
    }

    let by_kind = |kind: &str| {
        positions
            .iter()
            .copied()
            .filter(|p| p.is_kind(kind))
            .collect::<Vec<_>>()
    };
    let rest = || [skills_section(r), education_section(r), projects_section(r)].concat();

    let body = match args.section.as_deref() {
        None => [
            summary_section(r),
            experience_section("Experience", &positions),
            rest(),
        ]
        .concat(),
        Some("summary") => summary_section(r),
        Some("skills") => skills_section(r),
        Some("projects") => projects_section(r),
        Some("recent") => experience_section("Recent Experience", &recent(&positions)),
        Some("full-time") => [
            experience_section("Full-Time Experience", &by_kind("full-time")),
            rest(),
        ]
        .concat(),
        Some("consulting") => [
            experience_section("Consulting Experience", &by_kind("consulting")),
            rest(),
        ]
        .concat(),
        Some(other) => {
            log::debug!("resume: no section '{other}', showing everything");
            [
                summary_section(r),
                experience_section("Experience", &positions),
                rest(),
            ]
            .concat()
        },
    };

    let mut out = header(r);
    out.push('\n');
    out.push_str(&body);
    if let Some(meta) = &r.meta {
        out.push_str(&format!("\n_v{} \u{b7} Updated {}_\n", meta.version, meta.updated));
    }
    out.trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Follow-ups
// ---------------------------------------------------------------------------

const AFTER_SKILLS: QuickSet = &[
    ("resume", "View full resume"),
    ("resume projects", "View my projects"),
    ("resume recent", "Recent experience only"),
    ("about", "Learn more about me"),
    ("help", "See all available commands"),
];

const AFTER_PROJECTS: QuickSet = &[
    ("resume", "View full resume"),
    ("resume skills", "View my skills"),
    ("resume recent", "Recent experience only"),
    ("about", "Learn more about me"),
    ("help", "See all available commands"),
];

const AFTER_RECENT: QuickSet = &[
    ("resume", "View full resume"),
    ("resume skills", "View my skills"),
    ("resume projects", "View my projects"),
    ("resume --full-time-only", "Full-time only"),
    ("help", "See all available commands"),
];

fn follow_ups(section: Option<&str>) -> QuickSet {
    match section {
        Some("skills") => AFTER_SKILLS,
        Some("projects") => AFTER_PROJECTS,
        Some("recent") => AFTER_RECENT,
        _ => RESUME_VARIATIONS,
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

pub(crate) struct ResumeCmd {
    store: Rc<dyn ContentStore>,
    marker: char,
}

impl ResumeCmd {
    pub(crate) fn new(store: Rc<dyn ContentStore>, marker: char) -> Self {
        Self { store, marker }
    }

    async fn load(&self) -> Result<Resume> {
        let raw = self.store.fetch(RESUME_PATH).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait(?Send)]
impl Command for ResumeCmd {
    fn name(&self) -> &str {
        "resume"
    }
    fn description(&self) -> &str {
        "View my professional experience and background"
    }
    fn aliases(&self) -> &[&str] {
        &["cv", "work"]
    }
    fn suggestions(&self) -> Option<CommandSuggestions> {
        Some(CommandSuggestions {
            subcommands: SECTIONS
                .iter()
                .map(|(name, desc)| SuggestionItem::new(*name, *desc))
                .collect(),
            arguments: vec![
                SuggestionItem::new("--since-year", "Only positions held in or after a year")
                    .with_params("<year>"),
                SuggestionItem::new("--full-time-only", "Only full-time positions"),
            ],
        })
    }
    async fn execute(&self, args: &[String]) -> Result<CommandResponse> {
        let args = parse_args(args)?;
        let resume = match self.load().await {
            Ok(r) => r,
            Err(e) => {
                log::warn!("resume unavailable: {e}");
                return Ok(CommandResponse::text(format!("Failed to load resume: {e}")));
            },
        };
        let quick = quick_commands(self.marker, follow_ups(args.section.as_deref()));
        Ok(CommandResponse::markdown(render(&resume, &args)).with_quick_commands(QUICK_COMMANDS, quick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const SAMPLE: &str = r#"{
        "name": "Sam Example",
        "title": "Software Engineer",
        "summary": "Builds terminals.",
        "contact": { "email": "sam@example.com", "github": "samex" },
        "experience": [
            {
                "company": "Acme",
                "position": "Staff Engineer",
                "location": "Remote",
                "startDate": "2021-03",
                "endDate": "Present",
                "description": ["Led the shell rewrite"],
                "type": "full-time"
            },
            {
                "company": "Globex",
                "position": "Contractor",
                "startDate": "2019-06",
                "endDate": "2020-12",
                "description": ["Audited parsers"],
                "type": "consulting"
            },
            {
                "company": "Initech",
                "position": "Engineer",
                "startDate": "2015-01",
                "endDate": "2018-05",
                "type": "full-time"
            }
        ],
        "skills": [ { "category": "Languages", "items": ["Rust", "TypeScript"] } ],
        "education": [ { "institution": "State U", "degree": "BS", "field": "CS" } ],
        "projects": [ { "name": "slashterm", "description": "This.", "technologies": ["Rust"] } ],
        "meta": { "version": "2.1", "updated": "2024-05" }
    }"#;

    struct Fixed {
        body: std::result::Result<&'static str, &'static str>,
        hits: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ContentStore for Fixed {
        async fn fetch(&self, path: &str) -> Result<String> {
            assert_eq!(path, RESUME_PATH);
            self.hits.set(self.hits.get() + 1);
            self.body
                .map(String::from)
                .map_err(|e| ShellError::Content(e.to_string()))
        }
    }

    fn cmd(body: std::result::Result<&'static str, &'static str>) -> ResumeCmd {
        ResumeCmd::new(
            Rc::new(Fixed {
                body,
                hits: Cell::new(0),
            }),
            '/',
        )
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    async fn run(list: &[&str]) -> String {
        cmd(Ok(SAMPLE)).execute(&args(list)).await.unwrap().content
    }

    #[tokio::test]
    async fn full_resume_has_every_section() {
        let out = run(&[]).await;
        assert!(out.starts_with("# Sam Example\n## Software Engineer"));
        for heading in ["### Summary", "### Experience", "### Skills", "### Education", "### Projects"] {
            assert!(out.contains(heading), "missing {heading}");
        }
        assert!(out.contains("Mar 2021 \u{2013} Present"));
        assert!(out.contains("Updated 2024-05"));
    }

    #[tokio::test]
    async fn summary_only() {
        let out = run(&["summary"]).await;
        assert!(out.contains("Builds terminals."));
        assert!(!out.contains("### Experience"));
    }

    #[tokio::test]
    async fn recent_prefers_current_positions() {
        let out = run(&["recent"]).await;
        assert!(out.contains("Acme"));
        assert!(!out.contains("Globex"));
        assert!(!out.contains("Initech"));
    }

    #[tokio::test]
    async fn recent_falls_back_to_latest_start() {
        let out = run(&["recent", "--since-year", "2016"]).await;
        assert!(out.contains("Acme"));
        let r: Resume = serde_json::from_str(SAMPLE).unwrap();
        let past: Vec<&Position> = r.experience.iter().filter(|p| !p.is_current()).collect();
        let latest = recent(&past);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].company, "Globex");
    }

    #[tokio::test]
    async fn kind_filters() {
        let out = run(&["consulting"]).await;
        assert!(out.contains("### Consulting Experience"));
        assert!(out.contains("Globex"));
        assert!(!out.contains("Acme"));
        assert!(out.contains("### Skills"));

        let out = run(&["--full-time-only"]).await;
        assert!(out.contains("Acme"));
        assert!(out.contains("Initech"));
        assert!(!out.contains("Globex"));
    }

    #[tokio::test]
    async fn since_year_filter() {
        let out = run(&["--since-year", "2019"]).await;
        assert!(out.contains("Acme"));
        assert!(out.contains("Globex"));
        assert!(!out.contains("Initech"));
    }

    #[tokio::test]
    async fn empty_tokens_are_skipped() {
        let out = run(&["", "skills"]).await;
        assert!(out.contains("**Languages**: Rust, TypeScript"));
        assert!(!out.contains("### Experience"));
    }

    #[tokio::test]
    async fn bad_year_is_an_error() {
        let err = cmd(Ok(SAMPLE))
            .execute(&args(&["--since-year", "soon"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[tokio::test]
    async fn unknown_section_shows_everything() {
        let r = cmd(Ok(SAMPLE)).execute(&args(&["hobbies"])).await.unwrap();
        assert_eq!(r.content, run(&[]).await);
        assert_eq!(r.quick.unwrap().items[0].command, "/resume recent");
    }

    async fn quick_lines(list: &[&str]) -> Vec<String> {
        let r = cmd(Ok(SAMPLE)).execute(&args(list)).await.unwrap();
        r.quick
            .unwrap()
            .items
            .into_iter()
            .map(|q| q.command)
            .collect()
    }

    #[tokio::test]
    async fn follow_ups_depend_on_section() {
        assert_eq!(
            quick_lines(&[]).await,
            ["/resume recent", "/resume skills", "/resume projects", "/resume --full-time-only", "/help"]
        );
        assert_eq!(
            quick_lines(&["skills"]).await,
            ["/resume", "/resume projects", "/resume recent", "/about", "/help"]
        );
        assert_eq!(
            quick_lines(&["projects"]).await,
            ["/resume", "/resume skills", "/resume recent", "/about", "/help"]
        );
        assert_eq!(
            quick_lines(&["recent"]).await,
            ["/resume", "/resume skills", "/resume projects", "/resume --full-time-only", "/help"]
        );
    }

    #[tokio::test]
    async fn failed_load_offers_no_follow_ups() {
        let r = cmd(Err("offline")).execute(&[]).await.unwrap();
        assert!(r.quick.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_becomes_text() {
        let r = cmd(Err("offline")).execute(&[]).await.unwrap();
        assert!(r.content.starts_with("Failed to load resume:"));
        assert!(r.content.contains("offline"));
    }

    #[tokio::test]
    async fn malformed_json_becomes_text() {
        let r = cmd(Ok("{ not json")).execute(&[]).await.unwrap();
        assert!(r.content.starts_with("Failed to load resume:"));
    }

    fn position(start: &str, end: Option<&str>) -> Position {
        Position {
            company: "Umbrella".to_string(),
            position: "Engineer".to_string(),
            location: String::new(),
            start_date: start.to_string(),
            end_date: end.map(String::from),
            description: Vec::new(),
            kind: Some("full-time".to_string()),
            technologies: Vec::new(),
        }
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2020-01"), "Jan 2020");
        assert_eq!(format_date("2020-12-31"), "Dec 2020");
        assert_eq!(format_date("present"), "Present");
        assert_eq!(format_date("2020"), "2020");
        assert_eq!(format_date("2020-13"), "2020-13");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn full_dates_count_toward_since_year() {
        let p = position("2018-01-10", Some("2020-12-31"));
        assert!(p.active_since(2019));
        assert!(p.active_since(2020));
        assert!(!p.active_since(2021));
        assert_eq!(format_range(&p), "Jan 2018 \u{2013} Dec 2020");
    }

    #[test]
    fn unparseable_end_falls_back_to_start() {
        let p = position("2017-04", Some("someday"));
        assert!(p.active_since(2017));
        assert!(!p.active_since(2018));
    }

    #[test]
    fn recent_orders_mixed_date_precision() {
        let older = position("2019-06", Some("2020-01"));
        let newer = position("2019-06-15", Some("2021-02-28"));
        let year_only = position("2019", Some("2019"));
        let latest = recent(&[&older, &newer, &year_only]);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].end_date.as_deref(), Some("2021-02-28"));
    }

    #[test]
    fn suggestions_cover_sections_and_flags() {
        let s = cmd(Ok(SAMPLE)).suggestions().unwrap();
        assert_eq!(s.subcommands.len(), 6);
        assert_eq!(s.arguments[0].display_text(), "--since-year <year>");
    }
}
