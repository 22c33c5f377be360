use crate::catalog::Course;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Students,
    Courses,
    Revenue,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub kind: StatKind,
    pub label: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
}

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        kind: StatKind::Students,
        label: "Total Students",
        value: "12,840",
        trend: "+12.5%",
    },
    StatCard {
        kind: StatKind::Courses,
        label: "Active Courses",
        value: "45",
        trend: "+2",
    },
    StatCard {
        kind: StatKind::Revenue,
        label: "Total Revenue",
        value: "$245,000",
        trend: "+8.4%",
    },
    StatCard {
        kind: StatKind::Completion,
        label: "Completion Rate",
        value: "68%",
        trend: "+2.1%",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrend {
    pub day: &'static str,
    pub enrollments: u32,
    pub revenue: u32,
}

const fn day(day: &'static str, enrollments: u32, revenue: u32) -> DailyTrend {
    DailyTrend {
        day,
        enrollments,
        revenue,
    }
}

pub const WEEKLY_TREND: [DailyTrend; 7] = [
    day("Mon", 40, 2400),
    day("Tue", 30, 1398),
    day("Wed", 20, 9800),
    day("Thu", 27, 3908),
    day("Fri", 18, 4800),
    day("Sat", 23, 3800),
    day("Sun", 34, 4300),
];

pub fn total_enrollments(trend: &[DailyTrend]) -> u32 {
    trend.iter().map(|d| d.enrollments).sum()
}

pub fn total_revenue(trend: &[DailyTrend]) -> u32 {
    trend.iter().map(|d| d.revenue).sum()
}

/// Day with the most enrollments; the earliest wins a tie.
pub fn peak_day(trend: &[DailyTrend]) -> Option<&DailyTrend> {
    trend
        .iter()
        .fold(None, |best: Option<&DailyTrend>, d| match best {
            Some(b) if b.enrollments >= d.enrollments => Some(b),
            _ => Some(d),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePerformance {
    pub course_id: String,
    pub title: String,
    pub instructor: String,
    pub sales: u32,
}

const PERFORMANCE_ROWS: usize = 4;

pub fn course_performance(catalog: &[Course]) -> Vec<CoursePerformance> {
    catalog
        .iter()
        .take(PERFORMANCE_ROWS)
        .map(|c| CoursePerformance {
            course_id: c.id.clone(),
            title: c.title.clone(),
            instructor: c.instructor.clone(),
            sales: 840,
        })
        .collect()
}

pub fn truncate_for_table(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_len.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Text rendering of the admin view for the terminal.
pub fn render_admin_report(catalog: &[Course]) -> String {
    let mut out = String::new();
    out.push_str("Admin Dashboard\n");
    out.push_str("Manage your academy and monitor performance.\n\n");

    for card in &STAT_CARDS {
        out.push_str(&format!(
            "  {:<16} {:>10}  ({})\n",
            card.label, card.value, card.trend
        ));
    }

    out.push_str("\nEnrollment Trends\n");
    let max = WEEKLY_TREND.iter().map(|d| d.enrollments).max().unwrap_or(1).max(1);
    for d in &WEEKLY_TREND {
        let width = (d.enrollments * 30 / max) as usize;
        out.push_str(&format!(
            "  {} {:>3} {}\n",
            d.day,
            d.enrollments,
            "#".repeat(width)
        ));
    }
    if let Some(peak) = peak_day(&WEEKLY_TREND) {
        out.push_str(&format!(
            "  week total: {} enrollments, ${} revenue, peak {}\n",
            total_enrollments(&WEEKLY_TREND),
            total_revenue(&WEEKLY_TREND),
            peak.day
        ));
    }

    out.push_str("\nRecent Course Performance\n");
    out.push_str(&format!(
        "  {:<28} | {:<18} | {}\n",
        "Course", "Instructor", "Sales"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(56)));
    for row in course_performance(catalog) {
        out.push_str(&format!(
            "  {:<28} | {:<18} | {}\n",
            truncate_for_table(&row.title, 28),
            truncate_for_table(&row.instructor, 18),
            row.sales
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock_catalog;

    #[test]
    fn weekly_totals() {
        assert_eq!(total_enrollments(&WEEKLY_TREND), 192);
        assert_eq!(total_revenue(&WEEKLY_TREND), 30406);
    }

    #[test]
    fn peak_is_monday() {
        assert_eq!(peak_day(&WEEKLY_TREND).unwrap().day, "Mon");
        assert!(peak_day(&[]).is_none());
    }

    #[test]
    fn peak_tie_keeps_earliest() {
        let trend = [day("A", 5, 0), day("B", 9, 0), day("C", 9, 0)];
        assert_eq!(peak_day(&trend).unwrap().day, "B");
    }

    #[test]
    fn performance_lists_first_four_courses() {
        let rows = course_performance(&mock_catalog());
        let ids: Vec<&str> = rows.iter().map(|r| r.course_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3", "c4"]);
        assert!(rows.iter().all(|r| r.sales == 840));
    }

    #[test]
    fn truncation_marks_cut() {
        assert_eq!(truncate_for_table("short", 10), "short");
        assert_eq!(truncate_for_table("Advanced React", 8), "Advance…");
        assert_eq!(truncate_for_table("Advanced React", 8).chars().count(), 8);
    }

    #[test]
    fn report_mentions_every_section() {
        let report = render_admin_report(&mock_catalog());
        assert!(report.contains("Total Revenue"));
        assert!(report.contains("$245,000"));
        assert!(report.contains("peak Mon"));
        assert!(report.contains("Prof. Alan Turing"));
        assert!(!report.contains("Cyber Security Essentials"));
    }
}
