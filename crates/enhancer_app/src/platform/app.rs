use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use enhancer_core::{update, AppState, LifecycleState, Msg};
use enhancer_engine::EngineHandle;
use enhancer_logging::{enhancer_debug, enhancer_info};

use super::config::Args;
use super::effects::{EffectRunner, RunnerEvent, SaveOutcome};
use super::{input, logging, ui};

pub const EXIT_SETUP_FAILED: u8 = 3;
const EXIT_ENHANCE_FAILED: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;

// Render tick while waiting on the engine.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> Result<ExitCode> {
    let args = Args::parse();
    if let Some(destination) = args.log_destination() {
        logging::initialize(destination, args.log_level());
    }

    let config = args.engine_config()?;
    let document = input::load_document(args.resume.as_deref())?;
    let job_description = input::load_job_description(
        args.job_description.as_deref(),
        args.job_description_file.as_deref(),
    )?;

    enhancer_info!("Using backend {}", config.base_url);
    let engine = EngineHandle::new(config).context("starting engine")?;
    let mut controller = Controller::new(EffectRunner::new(engine, !args.no_warmup), io::stdout());

    controller.dispatch(Msg::Started);
    controller.dispatch(Msg::DocumentSelected(document));
    controller.dispatch(Msg::JobDescriptionChanged(job_description));
    controller.dispatch(Msg::SubmitClicked);
    controller.render_if_dirty()?;

    if !controller.state().lifecycle().is_submitting() {
        return Ok(ExitCode::from(EXIT_INVALID_INPUT));
    }
    controller.wait_for_completion()?;

    let LifecycleState::Succeeded(result) = controller.state().lifecycle().clone() else {
        return Ok(ExitCode::from(EXIT_ENHANCE_FAILED));
    };
    if let Some(output_dir) = args.save_to {
        if !controller.save_document(&result.document_url, output_dir)? {
            return Ok(ExitCode::from(EXIT_ENHANCE_FAILED));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Owns the core state, feeds it messages, executes its effects and renders
/// the view whenever it changed.
struct Controller<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    saves: u64,
}

impl<W: Write> Controller<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            saves: 0,
        }
    }

    fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render_if_dirty(&mut self) -> Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        for line in ui::render::render(&self.state.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn wait_for_completion(&mut self) -> Result<()> {
        while self.state.lifecycle().is_submitting() {
            match self.runner.next_event(POLL_INTERVAL)? {
                Some(RunnerEvent::Msg(msg)) => self.dispatch(msg),
                Some(RunnerEvent::Save { save_id, .. }) => {
                    enhancer_debug!("ignoring save result {} while submitting", save_id);
                }
                None => self.dispatch(Msg::Tick),
            }
            self.render_if_dirty()?;
        }
        Ok(())
    }

    /// Downloads the enhanced document; returns whether it was written.
    fn save_document(&mut self, url: &str, output_dir: PathBuf) -> Result<bool> {
        self.saves += 1;
        let save_id = self.saves;
        self.runner.save_document(save_id, url, output_dir);

        loop {
            match self.runner.next_event(POLL_INTERVAL)? {
                Some(RunnerEvent::Save {
                    save_id: finished,
                    outcome,
                }) if finished == save_id => {
                    let saved = match outcome {
                        SaveOutcome::Saved(path) => {
                            writeln!(self.out, "Saved enhanced resume to {}", path.display())?;
                            true
                        }
                        SaveOutcome::Failed(reason) => {
                            writeln!(self.out, "Could not save enhanced resume: {reason}")?;
                            false
                        }
                    };
                    self.out.flush()?;
                    return Ok(saved);
                }
                Some(RunnerEvent::Msg(msg)) => {
                    self.dispatch(msg);
                    self.render_if_dirty()?;
                }
                Some(RunnerEvent::Save { .. }) | None => {}
            }
        }
    }
}
