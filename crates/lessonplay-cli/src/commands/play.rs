//! Playback driver for the terminal.
//!
//! Two modes:
//! - interactive (default): wall-clock ticks advance the simulated
//!   player; stdin lines are user intents (play/pause, seek, option
//!   choice, submit, retry, captions).
//! - `--auto`: a synthetic clock runs the whole session without waiting,
//!   answering every checkpoint correctly. Used for demos and E2E tests.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use lessonplay_core::{
    now_ms, Config, Event, PlaySession, PlayerSurface, SimulatedPlayer,
};

const AUTO_STEP_SECS: f64 = 0.25;
const AUTO_STEP_MS: u64 = 250;

#[derive(Args)]
pub struct PlayArgs {
    /// Question bank TOML file (defaults to the configured bank, then
    /// the built-in sample)
    #[arg(long)]
    bank: Option<PathBuf>,
    /// Media length in seconds for the simulated player
    #[arg(long)]
    duration: Option<u64>,
    /// Run non-interactively: auto-answer correctly and print events
    #[arg(long)]
    auto: bool,
    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let bank = super::load_bank(args.bank.as_deref(), &config)?;
    for issue in bank.validate() {
        log::warn!("{issue}");
    }

    let duration = args
        .duration
        .unwrap_or(config.playback.default_duration_secs) as f64;
    let mut player = SimulatedPlayer::with_duration(duration);
    player.set_caption_visible(config.captions.enabled);
    let session = PlaySession::new(bank, player).with_zoom_window(config.zoom);

    if args.auto {
        run_auto(session, args.json)
    } else {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(run_interactive(session, &config, args.json))
    }
}

fn run_auto(
    mut session: PlaySession<SimulatedPlayer>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut clock_ms: u64 = 0;
    if let Some(event) = session.toggle_playback() {
        render_event(&event, &session, json);
    }

    // Bounded in case a malformed bank leaves no correct option to pick.
    for _ in 0..200_000 {
        clock_ms += AUTO_STEP_MS;
        session.player_mut().advance(AUTO_STEP_SECS);
        for event in session.tick(clock_ms) {
            render_event(&event, &session, json);
        }

        let pending = session
            .question()
            .filter(|q| !q.feedback_visible)
            .and_then(|q| q.checkpoint.correct_option().map(|o| o.id.clone()));
        if let Some(option_id) = pending {
            if let Some(event) = session.select_option(&option_id) {
                render_event(&event, &session, json);
            }
            if let Some(event) = session.submit(clock_ms) {
                render_event(&event, &session, json);
            }
        }

        if session.ended() {
            break;
        }
    }

    render_summary(&session, json);
    Ok(())
}

async fn run_interactive(
    mut session: PlaySession<SimulatedPlayer>,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !json {
        print_help();
    }

    // Blocking stdin reader feeding the event loop.
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let tick = Duration::from_millis(config.playback.tick_interval_ms.max(50));
    let mut interval = tokio::time::interval(tick);
    let speed = if config.playback.speed > 0.0 {
        config.playback.speed
    } else {
        1.0
    };
    let mut last_ms = now_ms();
    let mut last_shown_second: Option<u64> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = now_ms();
                let dt = now.saturating_sub(last_ms) as f64 / 1000.0 * speed;
                last_ms = now;
                session.player_mut().advance(dt);
                for event in session.tick(now) {
                    render_event(&event, &session, json);
                }
                if !json && session.player().is_playing() {
                    let second = session.player().current_time().floor() as u64;
                    if last_shown_second != Some(second) {
                        last_shown_second = Some(second);
                        println!("{}", progress_line(&session));
                    }
                }
                if session.ended() {
                    break;
                }
            }
            line = rx.recv() => {
                match line {
                    None => break,
                    Some(line) => {
                        if handle_intent(&line, &mut session, json) {
                            break;
                        }
                    }
                }
            }
        }
    }

    render_summary(&session, json);
    Ok(())
}

/// Returns true when the session should end.
fn handle_intent(line: &str, session: &mut PlaySession<SimulatedPlayer>, json: bool) -> bool {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return false;
    };

    let event = match cmd {
        "q" | "quit" => return true,
        "h" | "help" | "?" => {
            print_help();
            None
        }
        "p" | "play" | "pause" => session.toggle_playback(),
        "cc" | "captions" => Some(session.toggle_captions()),
        "s" | "submit" => session.submit(now_ms()),
        "r" | "retry" => session.try_again(),
        "status" => {
            let snapshot = session.snapshot();
            render_event(&snapshot, session, json);
            None
        }
        "seek" => match parts.next().and_then(|v| v.parse::<f64>().ok()) {
            Some(t) => Some(session.seek(t)),
            None => {
                eprintln!("usage: seek <seconds>");
                None
            }
        },
        number => match number.parse::<usize>() {
            Ok(n) if n >= 1 => {
                let option_id = session
                    .question()
                    .and_then(|q| q.checkpoint.options.get(n - 1))
                    .map(|o| o.id.clone());
                match option_id {
                    Some(id) => session.select_option(&id),
                    None => {
                        eprintln!("no such option: {number}");
                        None
                    }
                }
            }
            _ => {
                eprintln!("unknown command: {line} (h for help)");
                None
            }
        },
    };

    if let Some(event) = event {
        render_event(&event, session, json);
    }
    false
}

fn render_event(event: &Event, session: &PlaySession<SimulatedPlayer>, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
        return;
    }
    match event {
        Event::PlaybackResumed { time, .. } => println!("▶ playing from {}", format_time(*time)),
        Event::PlaybackPaused { time, .. } => println!("⏸ paused at {}", format_time(*time)),
        Event::Seeked { to, .. } => println!("seeked to {}", format_time(*to)),
        Event::CaptionsToggled { enabled, .. } => {
            println!("captions {}", if *enabled { "on" } else { "off" })
        }
        Event::CheckpointTriggered { .. } | Event::RetryStarted { .. } => render_question(session),
        Event::OptionSelected { option_id, .. } => println!("selected {option_id}"),
        Event::AnswerEvaluated { correct, .. } => render_feedback(session, *correct),
        Event::CheckpointResolved { checkpoint_id, .. } => {
            println!("checkpoint {checkpoint_id} answered")
        }
        Event::ZoomEntered { .. } => println!("🔍 zoom active"),
        Event::ZoomExited { .. } => println!("🔍 zoom off"),
        Event::PlaybackEnded { .. } => println!("video finished"),
        Event::StateSnapshot { .. } => {
            if let Ok(pretty) = serde_json::to_string_pretty(event) {
                println!("{pretty}");
            }
        }
    }
}

fn render_question(session: &PlaySession<SimulatedPlayer>) {
    let Some(question) = session.question() else {
        return;
    };
    println!();
    println!("{}", question.checkpoint.prompt);
    for (i, option) in question.checkpoint.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option.text);
    }
    println!("(type an option number, then s to submit)");
}

fn render_feedback(session: &PlaySession<SimulatedPlayer>, correct: bool) {
    let Some(question) = session.question() else {
        return;
    };
    for (i, option) in question.checkpoint.options.iter().enumerate() {
        let selected = question.selected.as_deref() == Some(option.id.as_str());
        let marker = if option.correct {
            " ✓"
        } else if selected {
            " ✗"
        } else {
            ""
        };
        println!("  {}. {}{}", i + 1, option.text, marker);
    }
    if correct {
        println!("✓ Correct! {}", question.checkpoint.feedback.correct);
        println!("Video will continue in 2 seconds...");
    } else {
        println!("✗ Incorrect. {}", question.checkpoint.feedback.incorrect);
        println!("(type r to try again)");
    }
}

fn progress_line(session: &PlaySession<SimulatedPlayer>) -> String {
    let current = session.player().current_time();
    let range = session.player().duration().unwrap_or(100.0);
    let filled = (session.progress_pct() / 10.0).round() as usize;
    let bar: String = (0..10).map(|i| if i < filled { '=' } else { ' ' }).collect();
    let mut line = format!("[{bar}] {} / {}", format_time(current), format_time(range));
    if session.player().caption_visible() {
        line.push_str("  cc");
    }
    if session.zoom_active() {
        line.push_str("  🔍");
    }
    line
}

fn render_summary(session: &PlaySession<SimulatedPlayer>, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(&session.snapshot()) {
            println!("{line}");
        }
    } else {
        println!(
            "answered {}/{} checkpoints",
            session.answered().len(),
            session.bank().len()
        );
    }
}

fn print_help() {
    println!(
        "commands: p = play/pause, seek <seconds>, cc = captions, \
         1-9 = choose option, s = submit, r = retry, status, q = quit"
    );
}

fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
