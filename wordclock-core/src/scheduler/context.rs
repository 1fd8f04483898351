//! Scheduler context
//!
//! All runtime state of the clock lives in [`SchedulerContext`]. The board
//! calls [`SchedulerContext::tick`] from its main loop and
//! [`SchedulerContext::button`] with every button sample; commands from the
//! outside are applied through the remaining methods between ticks.
//!
//! Exactly one producer writes the target grid per tick: the clock face,
//! the active submode, or a direct frame. The context is the only owner of
//! the compositor, so this holds by construction.

use heapless::String;

use super::button::{ButtonAction, ButtonTracker};
use super::timers::SchedulerTimers;
use crate::config::{ClockColors, ClockConfig, ConfigError, Settings};
use crate::error::Error;
use crate::grid::{map_phrase, MinuteIndicator, Rgb, VocabularyGrid, GRID_CELLS, GRID_WIDTH};
use crate::grid::vocabulary::DUMP_LEN;
use crate::phrase::{ClockTime, Idiom};
use crate::render::{draw_digital_clock, Compositor, SmoothingFactor};
use crate::state::{Event, ModeState};
use crate::traits::{Control, DisplaySink, PlayStyle, SubmodeBank, SubmodeKind, TimeSource};

/// What happened during one [`SchedulerContext::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub heartbeat: bool,
    /// The active mode produced a new target grid
    pub state_updated: bool,
    /// The compositor emitted a frame
    pub composited: bool,
    pub auto_advanced: bool,
    pub nightmode_changed: bool,
    /// Restart is due; nothing else ran this call
    pub restart_requested: bool,
    /// The clock face could not be rendered, the previous frame stays
    pub render_error: Option<Error>,
}

/// Snapshot for status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub state: ModeState,
    pub auto_change: bool,
    pub nightmode: bool,
    pub settings: Settings,
}

impl Status {
    pub fn state_id(&self) -> u8 {
        self.state.id()
    }
}

/// Runtime state of the clock
pub struct SchedulerContext<B> {
    state: ModeState,
    auto_change: bool,
    nightmode: bool,
    timers: SchedulerTimers,
    button: ButtonTracker,
    compositor: Compositor,
    config: ClockConfig,
    settings: Settings,
    /// Smoothing of every mode that does not ask for instant frames
    smoothing: SmoothingFactor,
    idiom: &'static dyn Idiom,
    vocabulary: VocabularyGrid,
    submodes: B,
}

impl<B: SubmodeBank> SchedulerContext<B> {
    /// Create a context in the `Clock` state
    ///
    /// `boot_ms` is the monotonic time all timers start from.
    pub fn new(
        config: ClockConfig,
        idiom: &'static dyn Idiom,
        submodes: B,
        boot_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let smoothing = SmoothingFactor::from_f32(config.smoothing)?;
        let vocabulary = idiom.vocabulary().with_orientation(config.orientation);

        let mut ctx = Self {
            state: ModeState::default(),
            auto_change: false,
            nightmode: false,
            timers: SchedulerTimers::new(boot_ms),
            button: ButtonTracker::new(),
            compositor: Compositor::new(smoothing),
            config,
            settings: config.settings,
            smoothing,
            idiom,
            vocabulary,
            submodes,
        };
        ctx.entry_action(ctx.state);
        Ok(ctx)
    }

    /// Apply brightness and show a blank frame
    pub fn start<D: DisplaySink>(&mut self, display: &mut D) -> Result<(), Error> {
        info!(
            "Nightmode starts at: {}:{}",
            self.settings.nightmode.start.hour(),
            self.settings.nightmode.start.minute()
        );
        info!(
            "Nightmode ends at: {}:{}",
            self.settings.nightmode.end.hour(),
            self.settings.nightmode.end.minute()
        );
        info!("Brightness: {}", self.settings.brightness);
        display.set_brightness(self.settings.brightness)?;
        self.compositor.draw_instant(display)?;
        Ok(())
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn auto_change(&self) -> bool {
        self.auto_change
    }

    pub fn is_nightmode(&self) -> bool {
        self.nightmode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn timers(&self) -> &SchedulerTimers {
        &self.timers
    }

    pub fn submodes(&self) -> &B {
        &self.submodes
    }

    pub fn submodes_mut(&mut self) -> &mut B {
        &mut self.submodes
    }

    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            auto_change: self.auto_change,
            nightmode: self.nightmode,
            settings: self.settings,
        }
    }

    /// Text dump of the target grid against the face letters
    pub fn dump_target(&self) -> String<DUMP_LEN> {
        self.vocabulary.dump(self.compositor.target())
    }

    /// Run one main loop iteration
    ///
    /// Order: restart check, heartbeat, state update, recomposite,
    /// auto-advance, nightmode window check. Each timer fires at most once
    /// per call.
    pub fn tick<T, D>(&mut self, now_ms: u64, time: &mut T, display: &mut D) -> Result<TickReport, Error>
    where
        T: TimeSource,
        D: DisplaySink,
    {
        let mut report = TickReport::default();
        let timing = self.config.timing;
        let now = time.now();

        if self.config.restart.is_due(now_ms, now.hour()) {
            warn!("auto restart due, uptime {} ms", now_ms);
            report.restart_requested = true;
            return Ok(report);
        }

        if self.timers.heartbeat.fire(now_ms, timing.heartbeat_ms) {
            info!("Heartbeat, state: {}", self.state.name());
            report.heartbeat = true;
        }

        let period = timing.period(self.auto_change, self.state);
        if !self.nightmode
            && !self
                .timers
                .direct_override_active(now_ms, timing.direct_timeout_ms)
            && self.timers.step.fire(now_ms, period)
        {
            report.state_updated = true;
            if let Err(err) = self.update_state(now) {
                report.render_error = Some(err);
            }
        }

        if !self.nightmode && self.timers.matrix_update.fire(now_ms, timing.matrix_update_ms) {
            self.compositor.tick(display)?;
            report.composited = true;
        }

        if self.auto_change
            && !self.nightmode
            && self.timers.state_change.fire(now_ms, timing.state_change_ms)
        {
            self.dispatch(Event::AutoAdvance, display)?;
            report.auto_advanced = true;
        }

        if self.timers.nightmode_check.fire(now_ms, timing.nightmode_check_ms) {
            report.nightmode_changed = self.check_nightmode_window(now, display)?;
        }

        Ok(report)
    }

    /// Let the active mode write the target grid
    fn update_state(&mut self, now: ClockTime) -> Result<(), Error> {
        let colors = self.settings.colors;
        match self.state {
            ModeState::Clock => {
                let phrase = self.idiom.phrase(now);
                // On failure the previous target stays in place
                let grid = map_phrase(&self.vocabulary, &phrase, colors.main)?;
                self.compositor.set_target(grid);
                self.compositor
                    .set_indicator(MinuteIndicator::for_minute(now.minute(), colors.main));
            }
            ModeState::DigitalClock => {
                draw_digital_clock(self.compositor.target_mut(), now, colors.main, colors.second);
            }
            state => {
                if let Some(kind) = state.submode() {
                    self.submodes
                        .submode(kind)
                        .loop_cycle(self.compositor.target_mut());
                }
            }
        }
        Ok(())
    }

    fn check_nightmode_window<D: DisplaySink>(
        &mut self,
        now: ClockTime,
        display: &mut D,
    ) -> Result<bool, Error> {
        let window = self.settings.nightmode;
        // Start wins when both fall on the same minute
        if window.starts_at(now) {
            if self.nightmode {
                return Ok(false);
            }
            self.set_nightmode(true, display)
        } else if window.ends_at(now) && self.nightmode {
            self.set_nightmode(false, display)
        } else {
            Ok(false)
        }
    }

    /// Process a mode event
    ///
    /// Clears nightmode, flushes the target grid and runs the entry action
    /// of the new mode.
    pub fn dispatch<D: DisplaySink>(&mut self, event: Event, display: &mut D) -> Result<(), Error> {
        let next = self.state.transition(event);
        if self.nightmode {
            self.set_nightmode(false, display)?;
        }
        self.compositor.flush();
        self.state = next;
        self.entry_action(next);
        info!("State change to: {}", next.name());
        Ok(())
    }

    /// Jump to `state`
    pub fn select<D: DisplaySink>(&mut self, state: ModeState, display: &mut D) -> Result<(), Error> {
        self.dispatch(Event::Select(state), display)
    }

    fn entry_action(&mut self, state: ModeState) {
        let style = PlayStyle::for_auto_change(self.auto_change);
        let smoothing = match (state, style) {
            (ModeState::Tetris, _) => SmoothingFactor::INSTANT,
            (ModeState::Snake | ModeState::PingPong, PlayStyle::Interactive) => {
                SmoothingFactor::INSTANT
            }
            _ => self.smoothing,
        };
        self.compositor.set_smoothing(smoothing);
        self.compositor.set_indicator(MinuteIndicator::OFF);

        if let Some(kind) = state.submode() {
            self.submodes.submode(kind).init(style);
        }
    }

    /// Feed a button sample
    ///
    /// A long press enters nightmode. A short press leaves nightmode, or
    /// advances to the next mode when nightmode is off.
    pub fn button<D: DisplaySink>(
        &mut self,
        pressed: bool,
        now_ms: u64,
        display: &mut D,
    ) -> Result<Option<ButtonAction>, Error> {
        let action = self.button.update(pressed, now_ms, &self.config.timing);
        match action {
            Some(ButtonAction::LongPress) => {
                self.set_nightmode(true, display)?;
            }
            Some(ButtonAction::ShortPress) if self.nightmode => {
                self.set_nightmode(false, display)?;
            }
            Some(ButtonAction::ShortPress) => {
                self.dispatch(Event::ShortPress, display)?;
            }
            None => {}
        }
        Ok(action)
    }

    /// Switch nightmode and blank the display immediately
    ///
    /// Returns whether the mode actually changed. The display is blanked
    /// either way.
    pub fn set_nightmode<D: DisplaySink>(&mut self, on: bool, display: &mut D) -> Result<bool, Error> {
        let changed = self.nightmode != on;
        self.nightmode = on;
        if changed {
            info!("Nightmode {}", if on { "on" } else { "off" });
        }
        self.compositor.flush();
        self.compositor.set_indicator(MinuteIndicator::OFF);
        self.compositor.draw_instant(display)?;
        Ok(changed)
    }

    pub fn set_auto_change(&mut self, on: bool) {
        info!("stateAutoChange: {}", on);
        self.auto_change = on;
    }

    /// Set the main colour and derive the second one
    ///
    /// Returns the settings to persist.
    pub fn set_colors(&mut self, main: Rgb) -> Settings {
        self.settings.colors = ClockColors::from_main(main);
        debug!(
            "clock colours {:x} / {:x}",
            self.settings.colors.main.to_u32(),
            self.settings.colors.second.to_u32()
        );
        self.settings
    }

    /// Replace nightmode window and brightness
    pub fn apply_settings<D: DisplaySink>(&mut self, settings: Settings, display: &mut D) -> Result<(), Error> {
        self.settings = settings;
        info!(
            "Nightmode {}:{} - {}:{}, brightness {}",
            settings.nightmode.start.hour(),
            settings.nightmode.start.minute(),
            settings.nightmode.end.hour(),
            settings.nightmode.end.minute(),
            settings.brightness
        );
        display.set_brightness(settings.brightness)?;
        Ok(())
    }

    /// Write an external frame straight to the display
    ///
    /// Pixels fill the grid row by row from the top-left cell. Extra
    /// pixels are ignored; cells past the end of a short frame keep their
    /// colour. Normal rendering pauses until the direct timeout expires.
    /// Returns the number of cells written.
    pub fn direct_frame<I, D>(&mut self, pixels: I, now_ms: u64, display: &mut D) -> Result<usize, Error>
    where
        I: IntoIterator<Item = Rgb>,
        D: DisplaySink,
    {
        let target = self.compositor.target_mut();
        let mut written = 0;
        for (k, color) in pixels.into_iter().take(GRID_CELLS).enumerate() {
            target.set(k % GRID_WIDTH, k / GRID_WIDTH, color);
            written += 1;
        }
        self.timers.direct_override_ms = Some(now_ms);
        debug!("direct frame, {} pixels", written);
        self.compositor.draw_instant(display)?;
        Ok(written)
    }

    /// Forward a control to one submode, whether active or not
    pub fn control(&mut self, kind: SubmodeKind, control: Control) {
        debug!("{} control {}", kind, control);
        self.submodes.submode(kind).control(control);
    }
}
