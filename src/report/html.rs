//! Static HTML rendering of a scan.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::ScanSummary;
use crate::model::{BreachOutcome, BreachStatus, GroupRef, MemberKind, MemberRecord};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#1f2933}\
h1{margin-bottom:.2rem}.meta{color:#616e7c;margin-top:0}\
.tiles{display:flex;flex-wrap:wrap;gap:1rem;margin:1.5rem 0}\
.tile{border:1px solid #cbd2d9;border-radius:6px;padding:.8rem 1.2rem;min-width:9rem}\
.tile b{display:block;font-size:1.6rem}\
table{border-collapse:collapse;width:100%;margin-bottom:2rem;font-size:.9rem}\
th,td{border:1px solid #e4e7eb;padding:.35rem .5rem;text-align:left;vertical-align:top}\
th{background:#f5f7fa}.Breached{color:#b91c1c;font-weight:600}.Clean{color:#047857}\
.Error{color:#b45309}ul{margin:0;padding-left:1.1rem}\
@media print{.tile{break-inside:avoid}tr{break-inside:avoid}}";

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt(value: Option<&str>) -> String {
    value.map_or_else(String::new, escape)
}

/// Renders the complete, self-contained report page.
///
/// `outcomes` is `None` when breach verification was skipped.
#[must_use]
pub fn render_html(
    generated_at: DateTime<Utc>,
    seeds: &[GroupRef],
    members: &[MemberRecord],
    outcomes: Option<&[BreachOutcome]>,
    summary: &ScanSummary,
) -> String {
    let mut html = String::new();
    let seed_names: Vec<String> = seeds.iter().map(|g| escape(&g.display_name)).collect();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Breach exposure report</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Breach exposure report</h1>\n<p class=\"meta\">Groups: {} &middot; Generated {}</p>\n",
        seed_names.join(", "),
        generated_at.format("%Y-%m-%d %H:%M UTC"),
    );

    html.push_str("<div class=\"tiles\">\n");
    let mut tiles = vec![
        ("Groups processed", summary.groups_processed),
        ("Unique users", summary.unique_users),
        ("Nested groups", summary.unique_nested_groups),
    ];
    if summary.verified {
        tiles.push(("Breached accounts", summary.breached_accounts));
        tiles.push(("Total breaches", summary.total_breaches));
        tiles.push(("Failed checks", summary.failed_checks));
    }
    for (label, value) in tiles {
        let _ = writeln!(html, "<div class=\"tile\"><b>{value}</b>{label}</div>");
    }
    html.push_str("</div>\n");

    render_members(&mut html, members);
    match outcomes {
        Some(outcomes) => render_outcomes(&mut html, outcomes),
        None => html.push_str(
            "<h2>Breach check</h2>\n<p>Breach verification was skipped for this run.</p>\n",
        ),
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_members(html: &mut String, members: &[MemberRecord]) {
    let _ = writeln!(html, "<h2>Group members ({})</h2>", members.len());
    html.push_str(
        "<table>\n<tr><th>Name</th><th>Email</th><th>Type</th><th>Department</th>\
         <th>Job title</th><th>Enabled</th><th>Parent group</th><th>Level</th></tr>\n",
    );
    for member in members {
        let kind = match member.kind {
            MemberKind::User => "User",
            MemberKind::Group => "Group",
        };
        let enabled = match member.account_enabled {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "",
        };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{kind}</td><td>{}</td><td>{}</td><td>{enabled}</td>\
             <td>{}</td><td>{}</td></tr>",
            escape(&member.display_name),
            opt(member.email.as_deref()),
            opt(member.department.as_deref()),
            opt(member.job_title.as_deref()),
            escape(&member.parent_group_name),
            member.nesting_level,
        );
    }
    html.push_str("</table>\n");
}

fn render_outcomes(html: &mut String, outcomes: &[BreachOutcome]) {
    let _ = writeln!(html, "<h2>Breach check ({} accounts)</h2>", outcomes.len());
    html.push_str(
        "<table>\n<tr><th>Email</th><th>Name</th><th>Department</th><th>Group</th>\
         <th>Status</th><th>Breaches</th><th>Details</th></tr>\n",
    );
    for outcome in outcomes {
        let details = match outcome.status {
            BreachStatus::Error => opt(outcome.error.as_deref()),
            _ if outcome.breaches.is_empty() => String::new(),
            _ => {
                let items: String = outcome
                    .breaches
                    .iter()
                    .map(|b| {
                        format!(
                            "<li><b>{}</b> ({}): {}</li>",
                            escape(&b.name),
                            escape(&b.date),
                            escape(&b.data_exposed)
                        )
                    })
                    .collect();
                format!("<ul>{items}</ul>")
            }
        };
        let label = outcome.status.label();
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{label}\">{label}</td>\
             <td>{}</td><td>{details}</td></tr>",
            escape(&outcome.email),
            escape(&outcome.display_name),
            opt(outcome.department.as_deref()),
            escape(&outcome.parent_group),
            outcome.breach_count,
        );
    }
    html.push_str("</table>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BreachEntry, DirectoryUser};
    use chrono::TimeZone;

    fn fixture() -> (Vec<GroupRef>, Vec<MemberRecord>, Vec<BreachOutcome>) {
        let seed = GroupRef { id: "g-1".into(), display_name: "R&D <core>".into() };
        let user = MemberRecord::user(
            DirectoryUser {
                id: "u-1".into(),
                display_name: "Zoë \"Z\" O'Neil".into(),
                user_principal_name: None,
                mail: Some("zoe@corp.example".into()),
                job_title: Some("Engineer".into()),
                department: None,
                account_enabled: Some(false),
            },
            &seed,
            0,
        );
        let outcome = BreachOutcome {
            email: "zoe@corp.example".into(),
            display_name: "Zoë".into(),
            department: None,
            parent_group: "R&D <core>".into(),
            status: BreachStatus::Breached,
            breach_count: 1,
            breaches: vec![BreachEntry {
                name: "<script>".into(),
                date: "2019-01-01".into(),
                data_exposed: "Passwords".into(),
            }],
            error: None,
        };
        (vec![seed], vec![user], vec![outcome])
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn renders_members_and_outcomes_escaped() {
        let (seeds, members, outcomes) = fixture();
        let summary = ScanSummary::compute(1, &members, Some(outcomes.as_slice()));
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();

        let html = render_html(at, &seeds, &members, Some(outcomes.as_slice()), &summary);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Groups: R&amp;D &lt;core&gt;"));
        assert!(html.contains("Generated 2025-03-01 09:30 UTC"));
        assert!(html.contains("Zoë &quot;Z&quot; O&#39;Neil"));
        assert!(html.contains("<td>No</td>"));
        assert!(html.contains("<b>&lt;script&gt;</b> (2019-01-01): Passwords"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<div class=\"tile\"><b>1</b>Breached accounts</div>"));
    }

    #[test]
    fn notes_skipped_verification() {
        let (seeds, members, _) = fixture();
        let summary = ScanSummary::compute(1, &members, None);
        let html = render_html(Utc::now(), &seeds, &members, None, &summary);
        assert!(html.contains("Breach verification was skipped"));
        assert!(!html.contains("Breached accounts"));
    }
}
