//! Plain-text rendering of a projection.
//!
//! Matched groups print first, one line per ledger row with the bank
//! cell only on the group's first line, so multi-row matches stay
//! visually grouped. The unmatched tail follows as parallel columns,
//! bank on the left and ledger on the right, paired by position.

use reconview_projector::{DisplayGroup, Projection, ProjectionSummary, Row};

struct Line {
    left: String,
    tag: String,
    right: String,
}

pub fn render(projection: &Projection) -> String {
    let mut lines: Vec<Line> = Vec::new();

    for group in &projection.groups {
        if let DisplayGroup::Matched {
            bank_index,
            bank_row,
            gl_rows,
            candidate,
            classification,
        } = group
        {
            let tag = format!("{} {:.2}", classification, candidate.confidence);
            let left = format!("[{}] {}", bank_index, format_row(bank_row));
            match gl_rows.first() {
                Some(first) => {
                    lines.push(Line {
                        left,
                        tag,
                        right: format!("[{}] {}", first.gl_index, format_row(&first.row)),
                    });
                    for entry in &gl_rows[1..] {
                        lines.push(Line {
                            left: String::new(),
                            tag: String::new(),
                            right: format!("[{}] {}", entry.gl_index, format_row(&entry.row)),
                        });
                    }
                }
                None => lines.push(Line {
                    left,
                    tag,
                    right: String::new(),
                }),
            }
        }
    }

    for (bank, gl) in projection.aligned_unmatched() {
        lines.push(Line {
            left: bank
                .map(|(i, row)| format!("[{}] {}", i, format_row(row)))
                .unwrap_or_default(),
            tag: "unmatched".to_string(),
            right: gl
                .map(|(i, row)| format!("[{}] {}", i, format_row(row)))
                .unwrap_or_default(),
        });
    }

    let left_width = lines.iter().map(|l| l.left.chars().count()).max().unwrap_or(0);
    let tag_width = lines.iter().map(|l| l.tag.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for line in &lines {
        let rendered = format!(
            "{:<lw$} | {:<tw$} | {}",
            line.left,
            line.tag,
            line.right,
            lw = left_width,
            tw = tag_width,
        );
        out.push_str(rendered.trim_end());
        out.push('\n');
    }
    out
}

/// One-line projection summary for stderr.
pub fn summary_line(summary: &ProjectionSummary) -> String {
    format!(
        "{} groups: {} matched ({} approved, {} high, {} low, {} no-match), {} unmatched bank, {} unmatched ledger",
        summary.total_groups,
        summary.matched,
        summary.approved,
        summary.high_confidence,
        summary.low_confidence,
        summary.no_match,
        summary.unmatched_bank,
        summary.unmatched_gl,
    )
}

fn format_row(row: &Row) -> String {
    row.iter()
        .map(|(column, value)| format!("{column}={value}"))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reconview_projector::{project, MatchCandidate, ProjectorConfig, Row, Scalar};

    fn row(pairs: &[(&str, &str)]) -> Row {
        Row::from_pairs(
            pairs
                .iter()
                .map(|(c, v)| (c.to_string(), Scalar::Text(v.to_string())))
                .collect(),
        )
    }

    fn candidate(bank_index: usize, gl_indexes: Vec<usize>, confidence: f64) -> MatchCandidate {
        MatchCandidate {
            bank_index,
            gl_indexes,
            confidence,
            ..Default::default()
        }
    }

    #[test]
    fn multi_row_match_renders_spacer_lines() {
        let bank = vec![row(&[("date", "2024-01-05"), ("amount", "100")])];
        let gl = vec![
            row(&[("date", "2024-01-05"), ("debit", "60")]),
            row(&[("date", "2024-01-05"), ("debit", "40")]),
        ];
        let matches = vec![candidate(0, vec![0, 1], 0.9)];
        let projection = project(&bank, &gl, &matches, &ProjectorConfig::default());

        let text = render(&projection);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("high_confidence 0.90"));
        assert!(lines[0].contains("debit=60"));
        // Second ledger row sits under the first with a blank bank cell.
        assert!(lines[1].starts_with(' '));
        assert!(lines[1].contains("debit=40"));
    }

    #[test]
    fn unmatched_tail_renders_as_parallel_columns() {
        let bank = vec![row(&[("date", "2024-01-05"), ("amount", "100")])];
        let gl = vec![
            row(&[("date", "2024-02-01"), ("debit", "7")]),
            row(&[("date", "2024-02-02"), ("debit", "8")]),
        ];
        let projection = project(&bank, &gl, &[], &ProjectorConfig::default());

        let text = render(&projection);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("amount=100"));
        assert!(lines[0].contains("unmatched"));
        assert!(lines[0].contains("debit=7"));
        // Ledger outnumbers bank; the extra slot has an empty left cell.
        assert!(lines[1].starts_with(' '));
        assert!(lines[1].contains("debit=8"));
    }

    #[test]
    fn summary_line_counts_everything() {
        let bank = vec![
            row(&[("date", "2024-01-05"), ("amount", "100")]),
            row(&[("date", "2024-01-06"), ("amount", "200")]),
        ];
        let gl = vec![row(&[("date", "2024-01-05"), ("debit", "100")])];
        let matches = vec![candidate(0, vec![0], 0.9)];
        let projection = project(&bank, &gl, &matches, &ProjectorConfig::default());

        let line = summary_line(&projection.summary);
        assert!(line.starts_with("2 groups: 1 matched"));
        assert!(line.contains("1 unmatched bank"));
        assert!(line.contains("0 unmatched ledger"));
    }
}
