mod pump;
mod ui;

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use lapwatch_core::{Stopwatch, TICK_MS};

use crate::pump::Pump;

const APP_NAME: &str = "Lapwatch";

// Pumps between clock redraws (100 ms at the default tick)
const REDRAW_TICKS: u64 = 10;

const CMD_TOGGLE: &str = "s";
const CMD_LAP: &str = "l";
const CMD_RESET: &str = "r";
const CMD_SAVE: &str = "w";
const CMD_HISTORY: &str = "h";
const CMD_DELETE: &str = "d";
const CMD_HELP: &str = "?";
const CMD_QUIT: &str = "q";
const CMD_CANCEL: &str = ":q";

#[derive(Debug, Clone)]
enum AppOp {
    Input(String),
    Pump,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AppMode {
    Stopwatch,
    SaveDialog,
    History,
    Help,
    ConfirmExit,
}

struct LapwatchApp<W: Write> {
    out: W,
    stopwatch: Stopwatch,
    mode: AppMode,
    help_return: AppMode,
    save_error: Option<String>,

    ops: Sender<AppOp>,
    pump: Option<Pump>,
    pumps: u64,
    quit: bool,
}

impl<W: Write> LapwatchApp<W> {
    fn new(out: W, ops: Sender<AppOp>) -> Self {
        Self {
            out,
            stopwatch: Stopwatch::new(),
            mode: AppMode::Stopwatch,
            help_return: AppMode::Stopwatch,
            save_error: None,
            ops,
            pump: None,
            pumps: 0,
            quit: false,
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        match self.mode {
            AppMode::Stopwatch => ui::draw_stopwatch(&mut self.out, &self.stopwatch),
            AppMode::SaveDialog => {
                ui::draw_save_dialog(&mut self.out, &self.stopwatch, self.save_error.as_deref())
            }
            AppMode::History => ui::draw_history(&mut self.out, self.stopwatch.sessions()),
            AppMode::Help => ui::draw_help(&mut self.out, help_text(self.help_return)),
            AppMode::ConfirmExit => ui::draw_confirm_exit(&mut self.out),
        }
    }

    fn start_pump(&mut self) {
        if self.pump.is_none() {
            self.pump = Some(Pump::start(
                Duration::from_millis(TICK_MS),
                self.ops.clone(),
                AppOp::Pump,
            ));
            log::debug!("pump started");
        }
    }

    fn stop_pump(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.stop();
            log::debug!("pump stopped");
        }
    }

    fn handle_pump(&mut self) -> io::Result<()> {
        // Pumps already queued when the stopwatch paused are dropped here
        if !self.stopwatch.is_running() {
            return Ok(());
        }
        self.stopwatch.tick();
        self.pumps += 1;
        if self.mode == AppMode::Stopwatch && self.pumps % REDRAW_TICKS == 0 {
            ui::draw_clock(&mut self.out, &self.stopwatch)?;
        }
        Ok(())
    }

    fn handle_input(&mut self, line: &str) -> io::Result<()> {
        match self.mode {
            AppMode::Stopwatch => self.handle_key_stopwatch(line.trim()),
            AppMode::SaveDialog => self.handle_save_dialog(line),
            AppMode::History => self.handle_key_history(line.trim()),
            AppMode::Help => self.mode = self.help_return,
            AppMode::ConfirmExit => self.handle_key_confirm_exit(line.trim()),
        }
        if self.quit {
            return Ok(());
        }
        self.redraw()
    }

    fn show_help(&mut self) {
        self.help_return = self.mode;
        self.mode = AppMode::Help;
    }

    fn handle_key_stopwatch(&mut self, key: &str) {
        match key {
            "" | CMD_TOGGLE => {
                if self.stopwatch.toggle() {
                    if self.stopwatch.is_running() {
                        self.start_pump();
                    } else {
                        self.stop_pump();
                    }
                }
            }
            CMD_LAP => {
                self.stopwatch.lap();
            }
            CMD_RESET => {
                if !self.stopwatch.is_running() {
                    self.stop_pump();
                    self.stopwatch.reset();
                }
            }
            CMD_SAVE => {
                if self.stopwatch.can_save() {
                    self.save_error = None;
                    self.mode = AppMode::SaveDialog;
                }
            }
            CMD_HISTORY => {
                if !self.stopwatch.sessions().is_empty() {
                    self.mode = AppMode::History;
                }
            }
            CMD_HELP => self.show_help(),
            CMD_QUIT => {
                if self.stopwatch.is_running() {
                    self.mode = AppMode::ConfirmExit;
                } else {
                    self.quit = true;
                }
            }
            _ => log::debug!("unknown command: {:?}", key),
        }
    }

    fn handle_save_dialog(&mut self, line: &str) {
        if line.trim() == CMD_CANCEL {
            self.save_error = None;
            self.mode = AppMode::Stopwatch;
            return;
        }
        match self.stopwatch.save_session(line) {
            Ok(_) => {
                self.save_error = None;
                self.mode = AppMode::Stopwatch;
            }
            Err(e) => {
                log::debug!("save rejected: {}", e);
                self.save_error = Some(e.to_string());
            }
        }
    }

    fn handle_key_history(&mut self, key: &str) {
        match key {
            CMD_QUIT | CMD_CANCEL => self.mode = AppMode::Stopwatch,
            CMD_HELP => self.show_help(),
            _ => {
                let Some(arg) = key.strip_prefix(CMD_DELETE) else {
                    log::debug!("unknown command: {:?}", key);
                    return;
                };
                match arg.trim().parse::<usize>() {
                    Ok(n) if n >= 1 => {
                        let id = self.stopwatch.sessions().get(n - 1).map(|s| s.id());
                        if let Some(id) = id {
                            self.stopwatch.delete_session(id);
                        }
                    }
                    _ => log::debug!("bad session number: {:?}", arg),
                }
            }
        }
    }

    fn handle_key_confirm_exit(&mut self, key: &str) {
        match key {
            "y" => {
                self.stopwatch.pause();
                self.stop_pump();
                self.quit = true;
            }
            "n" => self.mode = AppMode::Stopwatch,
            _ => {}
        }
    }

    fn shutdown(&mut self) {
        self.stop_pump();
        writeln!(self.out).ok();
    }
}

fn help_text(mode: AppMode) -> &'static str {
    match mode {
        AppMode::History => {
            "HISTORY HELP\n\n\
             d <n>  Delete session n\n\
             q      Back"
        }
        _ => {
            "STOPWATCH HELP\n\n\
             Enter  Start/Pause\n\
             s      Start/Pause\n\
             l      Record lap (running)\n\
             r      Reset (paused)\n\
             w      Save session (paused)\n\
             h      Session history\n\
             q      Quit"
        }
    }
}

fn read_loop(sender: Sender<AppOp>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if sender.send(AppOp::Input(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::error!("failed to read input: {}", e);
                break;
            }
        }
    }
    sender.send(AppOp::Quit).ok();
}

fn run<W: Write>(app: &mut LapwatchApp<W>, receiver: Receiver<AppOp>) -> anyhow::Result<()> {
    app.redraw()?;
    while let Ok(op) = receiver.recv() {
        match op {
            AppOp::Input(line) => app.handle_input(&line)?,
            AppOp::Pump => app.handle_pump()?,
            AppOp::Quit => break,
        }
        if app.quit {
            break;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("{} starting", APP_NAME);

    let (sender, receiver) = mpsc::channel();
    let input = sender.clone();
    std::thread::spawn(move || read_loop(input));

    let mut app = LapwatchApp::new(io::stdout(), sender);
    let result = run(&mut app, receiver);
    app.shutdown();
    log::info!("{} exiting", APP_NAME);
    result
}
