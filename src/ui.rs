use std::io::{self, Write};

use lapwatch_core::{format_hms_cs, format_mm_ss_cs, LapMark, Session, Stopwatch};

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[2J\x1b[H")
}

fn status_line(stopwatch: &Stopwatch) -> String {
    let state = if stopwatch.is_running() { "RUNNING" } else { "PAUSED " };
    format!("[{}]  {}  > ", state, format_mm_ss_cs(stopwatch.elapsed_ms()))
}

/// Rewrites the clock on the current line without touching the rest.
pub fn draw_clock<W: Write>(out: &mut W, stopwatch: &Stopwatch) -> io::Result<()> {
    write!(out, "\r{}", status_line(stopwatch))?;
    out.flush()
}

pub fn draw_stopwatch<W: Write>(out: &mut W, stopwatch: &Stopwatch) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "STOPWATCH")?;
    writeln!(out)?;

    let rows = stopwatch.lap_rows();
    if !rows.is_empty() {
        writeln!(out, "Lap Times")?;
        for row in rows {
            let tag = match row.mark {
                Some(LapMark::Best) => "  BEST",
                Some(LapMark::Worst) => "  WORST",
                None => "",
            };
            writeln!(
                out,
                "  #{:<3} {}   {}{}",
                row.lap.number,
                format_mm_ss_cs(row.interval_ms),
                format_mm_ss_cs(row.lap.absolute_ms),
                tag
            )?;
        }
        writeln!(out)?;
    }

    let toggle = if stopwatch.is_running() { "Enter=pause  l=lap" } else { "Enter=start  r=reset" };
    write!(out, "{}", toggle)?;
    if stopwatch.can_save() {
        write!(out, "  w=save")?;
    }
    let saved = stopwatch.sessions().len();
    if saved > 0 {
        write!(out, "  h=history ({})", saved)?;
    }
    writeln!(out, "  ?=help  q=quit")?;

    write!(out, "{}", status_line(stopwatch))?;
    out.flush()
}

pub fn draw_save_dialog<W: Write>(
    out: &mut W,
    stopwatch: &Stopwatch,
    error: Option<&str>,
) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "SAVE SESSION")?;
    writeln!(out)?;
    writeln!(
        out,
        "Total {}  Laps {}",
        format_mm_ss_cs(stopwatch.elapsed_ms()),
        stopwatch.laps().len()
    )?;
    if let Some(error) = error {
        writeln!(out, "! {}", error)?;
    }
    writeln!(out, ":q=cancel")?;
    write!(out, "Session name: ")?;
    out.flush()
}

pub fn draw_history<W: Write>(out: &mut W, sessions: &[Session]) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "SESSION HISTORY")?;
    writeln!(out)?;

    if sessions.is_empty() {
        writeln!(out, "No saved sessions yet")?;
    }

    for (i, session) in sessions.iter().enumerate() {
        writeln!(out, "{:>2}. {}", i + 1, session.name())?;
        writeln!(out, "    {}", format_created_at(session))?;
        writeln!(
            out,
            "    Total Time: {}  Laps: {}",
            format_hms_cs(session.total_ms()),
            session.lap_count()
        )?;
        if let (Some(best), Some(worst)) = (session.best_interval_ms(), session.worst_interval_ms()) {
            writeln!(
                out,
                "    Best Lap: {}  Worst Lap: {}",
                format_mm_ss_cs(best),
                format_mm_ss_cs(worst)
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "d <n>=delete  q=back")?;
    write!(out, "> ")?;
    out.flush()
}

fn format_created_at(session: &Session) -> String {
    session
        .created_at()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

pub fn draw_help<W: Write>(out: &mut W, help_text: &str) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "{}", help_text)?;
    writeln!(out)?;
    write!(out, "Press Enter to close")?;
    out.flush()
}

pub fn draw_confirm_exit<W: Write>(out: &mut W) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "Timer Running")?;
    writeln!(out)?;
    writeln!(out, "The stopwatch is still running.\nExit anyway?")?;
    writeln!(out, "  y = Stop & exit\n  n = Cancel")?;
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(draw: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        draw(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn stopwatch_with_laps(gaps: &[usize]) -> Stopwatch {
        let mut sw = Stopwatch::new();
        sw.start();
        for &gap in gaps {
            for _ in 0..gap {
                sw.tick();
            }
            sw.lap();
        }
        sw.pause();
        sw
    }

    #[test]
    fn test_stopwatch_marks_best_and_worst() {
        let sw = stopwatch_with_laps(&[50, 20, 80]);
        let screen = render(|out| draw_stopwatch(out, &sw));
        assert!(screen.contains("#2   00:00.20   00:00.70  BEST"));
        assert!(screen.contains("#3   00:00.80   00:01.50  WORST"));
        assert!(screen.contains("w=save"));
        assert!(screen.ends_with("[PAUSED ]  00:01.50  > "));
    }

    #[test]
    fn test_stopwatch_fresh_screen() {
        let sw = Stopwatch::new();
        let screen = render(|out| draw_stopwatch(out, &sw));
        assert!(!screen.contains("Lap Times"));
        assert!(!screen.contains("w=save"));
        assert!(!screen.contains("history"));
    }

    #[test]
    fn test_clock_line() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.tick();
        let line = render(|out| draw_clock(out, &sw));
        assert_eq!(line, "\r[RUNNING]  00:00.01  > ");
    }

    #[test]
    fn test_save_dialog_shows_error() {
        let sw = stopwatch_with_laps(&[10]);
        let screen = render(|out| draw_save_dialog(out, &sw, Some("Please enter a session name")));
        assert!(screen.contains("! Please enter a session name"));
        assert!(screen.contains("Laps 1"));
    }

    #[test]
    fn test_history() {
        let mut sw = stopwatch_with_laps(&[50, 20, 80]);
        sw.save_session("Run A").unwrap();
        let screen = render(|out| draw_history(out, sw.sessions()));
        assert!(screen.contains(" 1. Run A"));
        assert!(screen.contains("Total Time: 00:00:01.50  Laps: 3"));
        assert!(screen.contains("Best Lap: 00:00.20  Worst Lap: 00:00.80"));

        let empty = render(|out| draw_history(out, &[]));
        assert!(empty.contains("No saved sessions yet"));
    }
}
