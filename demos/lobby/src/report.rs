//! Boxed end-of-run summary.

use std::time::Duration;

use lb_sim::SimReport;

/// One policy's outcome plus the wall-clock cost of its dispatch calls.
pub struct PolicyRun {
    pub report:        SimReport,
    pub dispatch_time: Vec<Duration>,
    pub wall_time:     Duration,
}

impl PolicyRun {
    fn mean_dispatch_micros(&self) -> f64 {
        if self.dispatch_time.is_empty() {
            return 0.0;
        }
        let total: Duration = self.dispatch_time.iter().sum();
        total.as_secs_f64() * 1e6 / self.dispatch_time.len() as f64
    }

    fn lines(&self) -> Vec<String> {
        let r = &self.report;
        let p = &r.passengers;
        vec![
            "SIMULATION COMPLETE".to_owned(),
            format!("Assignment function:      {}", r.policy),
            format!("Duration of simulation:   {}", r.ticks_elapsed),
            format!("Maximum duration allowed: {}", r.iterations),
            format!("Total passengers arrived: {}", r.served),
            format!("Total traffic:            {} (+{})", r.total, r.unserved()),
            format!("Percentage processed:     {:.0}%", r.percent_processed()),
            format!("Mean wait to board:       {:.1} s", p.mean_wait_ticks),
            format!("Longest wait to board:    {} s", p.max_wait_ticks),
            format!("Mean time to destination: {:.1} s", p.mean_journey_secs),
            format!("Mean round trip:          {:.1} s", p.mean_trip_secs),
            format!("Mean dispatch decision:   {:.2} us", self.mean_dispatch_micros()),
            format!("Wall time:                {:.3} s", self.wall_time.as_secs_f64()),
        ]
    }

    /// The summary framed in box-drawing characters.
    pub fn render_box(&self) -> String {
        let lines = self.lines();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        out.push('┌');
        out.push_str(&"─".repeat(width + 2));
        out.push_str("┐\n");
        for line in &lines {
            out.push_str(&format!("│ {line:<width$} │\n"));
        }
        out.push('└');
        out.push_str(&"─".repeat(width + 2));
        out.push('┘');
        out
    }
}

#[cfg(test)]
mod tests {
    use lb_sim::PassengerStats;

    use super::*;

    fn run() -> PolicyRun {
        PolicyRun {
            report: SimReport {
                policy:        "journey",
                ticks_elapsed: 1200,
                iterations:    3600,
                served:        90,
                total:         100,
                timed_out:     false,
                passengers:    PassengerStats::default(),
            },
            dispatch_time: vec![Duration::from_micros(2), Duration::from_micros(4)],
            wall_time:     Duration::from_millis(5),
        }
    }

    #[test]
    fn box_lines_share_width() {
        let rendered = run().render_box();
        let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{rendered}");
        assert!(rendered.starts_with('┌'));
        assert!(rendered.ends_with('┘'));
    }

    #[test]
    fn box_reports_unserved_and_percentage() {
        let rendered = run().render_box();
        assert!(rendered.contains("100 (+10)"), "{rendered}");
        assert!(rendered.contains("90%"), "{rendered}");
        assert!(rendered.contains("3.00 us"), "{rendered}");
    }
}
