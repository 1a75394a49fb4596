//! inknote - control firmware for a battery-powered e-ink note and
//! dashboard device (nRF52840 + SoftDevice S140).
//!
//! One cooperative control loop owns all state; two event sources
//! feed it (the rotary encoder via a GPIOTE edge task, the BLE command
//! channel via the GATT task). Within each iteration the order is
//! fixed: input decode, page transitions, command processing, periodic
//! tasks, then the lifecycle tick - so a long-press radio toggle is
//! always visible to the sleep decision made in the same pass.
//!
//! Entering deep sleep (System OFF) is terminal: the button pin is
//! armed as the sole wake source and wake is a full reset.

#![no_std]
#![no_main]

mod ble;
mod clock;
mod command;
mod config;
mod error;
mod input_logic;
mod light;
mod notes;
mod pages;
mod panel;
mod power;
mod power_logic;
mod sensors;
mod storage;
mod ui;

use defmt::{info, unwrap, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pin as _, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::{bind_interrupts, saadc};
use embassy_time::{Duration, Instant, Timer};
use heapless::Vec;
use nrf_softdevice::{Flash, Softdevice};
use panic_probe as _;
use static_cell::StaticCell;

use crate::ble::gatt::{ble_task, softdevice_config, softdevice_task, Server};
use crate::ble::{RadioControl, COMMAND_QUEUE, RADIO_CONTROL};
use crate::clock::WallClock;
use crate::command::Command;
use crate::config::{
    LOOP_TICK_MS, MAX_NOTES, PERIODIC_RENDER_MS, PRE_SLEEP_DELAY_MS,
};
use crate::input_logic::{PressTracker, QuadDecoder, WakeEdge};
use crate::light::LightController;
use crate::notes::NoteStore;
use crate::pages::{Action, Page, PageMachine, UiEvent};
use crate::panel::EinkPanel;
use crate::power::{LifecycleEvent, LifecycleManager};
use crate::sensors::Sensors;
use crate::ui::buttons::{drain_encoder, encoder_task, initial_lines};
use crate::ui::display;
use crate::ui::views::{DashboardView, NoteDetailView, NotesListView, SystemInfoView};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

static SERVER: StaticCell<Server> = StaticCell::new();

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // SoftDevice owns interrupt priorities 0, 1 and 4.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    info!("inknote starting");

    let sd = Softdevice::enable(&softdevice_config());
    let server = SERVER.init(unwrap!(Server::new(sd)));
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));

    // Encoder lines on GPIOTE; the task publishes edges, the loop decodes.
    unwrap!(spawner.spawn(encoder_task(p.P0_11.degrade(), p.P0_12.degrade())));

    // Push button, level-sampled every tick; also the wake pin.
    let button = Input::new(p.P0_24.degrade(), Pull::Up);

    // Lamp on PWM channel 0.
    let mut lamp = SimplePwm::new_1ch(p.PWM0, p.P0_06);
    lamp.set_max_duty(255);

    // Light on AIN0, battery divider on AIN1.
    let adc_config = saadc::Config::default();
    let light_channel = saadc::ChannelConfig::single_ended(p.P0_02);
    let battery_channel = saadc::ChannelConfig::single_ended(p.P0_03);
    let adc = saadc::Saadc::new(p.SAADC, Irqs, adc_config, [light_channel, battery_channel]);
    let mut sensors = Sensors::new(adc);
    sensors.sample().await;

    // Notes come back from flash before the first paint.
    let mut flash = Flash::take(sd);
    let mut notes = NoteStore::new();
    if storage::load_notes(&mut notes, &mut flash).await.is_err() {
        warn!("Flash load degraded; missing slots read as empty");
    }
    info!("Loaded {} notes from flash", notes.count());

    let mut panel = EinkPanel::new();
    let boot_ms = now_ms();

    let (a, b) = initial_lines();
    let mut quad = QuadDecoder::new(a, b);
    let mut press = PressTracker::new();
    let mut wake_edge = WakeEdge::new();
    let mut pages = PageMachine::new();
    let mut light = LightController::new();
    let mut wall_clock = WallClock::new();
    let mut lifecycle = LifecycleManager::new(boot_ms);
    let mut last_periodic_ms = boot_ms;

    render(&mut panel, pages.page(), &pages, &notes, &wall_clock, &sensors, &lifecycle, boot_ms);

    loop {
        let now = now_ms();

        // 1. Input decode: encoder delta, then the button level.
        let delta = drain_encoder(&mut quad);
        if delta != 0 {
            lifecycle.activity(now);
            if let Some(action) = pages.apply(UiEvent::Nav(delta)) {
                perform(
                    action, &mut panel, &mut pages, &mut notes, &mut light, &mut lamp,
                    &wall_clock, &sensors, &mut lifecycle, now,
                );
            }
        }

        let pressed = button.is_low();
        if wake_edge.sample(pressed, now) {
            // Activity from the press edge itself, so a freshly woken
            // device cannot doze off while the wake press is held.
            lifecycle.activity(now);
        }
        if let Some(kind) = press.sample(pressed, now) {
            lifecycle.activity(now);
            let event = match kind {
                input_logic::PressKind::Short => UiEvent::ShortPress,
                input_logic::PressKind::Long => UiEvent::LongPress,
            };
            if let Some(action) = pages.apply(event) {
                perform(
                    action, &mut panel, &mut pages, &mut notes, &mut light, &mut lamp,
                    &wall_clock, &sensors, &mut lifecycle, now,
                );
            }
        }

        // 2. Command processing.
        while let Ok(raw) = COMMAND_QUEUE.try_receive() {
            // Invalid UTF-8 degrades to an empty string, which the
            // parser ignores - never an error back to the peer.
            let text = core::str::from_utf8(&raw).unwrap_or("");
            let Some(cmd) = command::parse(text) else {
                continue;
            };
            info!("command: {:?}", cmd);
            lifecycle.activity(now);

            match cmd {
                Command::AppendNote(body) | Command::AppendImplicit(body) => {
                    notes.append(body);
                    // The fresh note becomes the selection, so the list
                    // highlights it and NoteView opens on it.
                    pages.set_selected_note(notes.count() - 1);
                    if storage::save_notes(&notes, &mut flash).await.is_err() {
                        warn!("Note save failed; keeping in-memory copy");
                    }
                }
                Command::SetTime(epoch) => wall_clock.set(now, epoch),
                Command::ClearNotes => {
                    notes.clear_all();
                    pages.set_selected_note(0);
                    if storage::save_notes(&notes, &mut flash).await.is_err() {
                        warn!("Note save failed; keeping in-memory copy");
                    }
                }
                Command::DisableRadio => {
                    // Only an actual enabled-to-disabled transition
                    // mutates visible state; a redundant BLE:OFF must
                    // not cost an e-ink repaint.
                    if lifecycle.disable_radio() {
                        RADIO_CONTROL.signal(RadioControl::Disable);
                        render(
                            &mut panel, Page::Dashboard, &pages, &notes, &wall_clock,
                            &sensors, &lifecycle, now,
                        );
                    }
                    continue;
                }
            }

            render(
                &mut panel, cmd.render_page(), &pages, &notes, &wall_clock, &sensors,
                &lifecycle, now,
            );
        }

        // 3. Periodic tasks: lamp cadence, then the dashboard refresh.
        if light.poll_due(now) {
            sensors.sample().await;
            if let Some(level) = light.poll(now, sensors.lux()) {
                lamp.set_duty(0, level as u16);
            }
        }

        if now.saturating_sub(last_periodic_ms) >= PERIODIC_RENDER_MS {
            last_periodic_ms = now;
            if pages.wants_periodic_render() {
                render(
                    &mut panel, pages.page(), &pages, &notes, &wall_clock, &sensors,
                    &lifecycle, now,
                );
            }
        }

        // 4. Lifecycle tick, last: it must see this iteration's activity.
        match lifecycle.tick(now) {
            Some(LifecycleEvent::RadioTimeout) => {
                info!("BLE enable window expired");
                RADIO_CONTROL.signal(RadioControl::Disable);
                render(
                    &mut panel, Page::Dashboard, &pages, &notes, &wall_clock, &sensors,
                    &lifecycle, now,
                );
            }
            Some(LifecycleEvent::EnterSleep) => {
                enter_sleep(&mut panel, &pages, &notes, &wall_clock, &sensors, &lifecycle, now)
                    .await;
            }
            None => {}
        }

        Timer::after(Duration::from_millis(LOOP_TICK_MS)).await;
    }
}

/// Apply a page-machine action.
#[allow(clippy::too_many_arguments)]
fn perform(
    action: Action,
    panel: &mut EinkPanel,
    pages: &mut PageMachine,
    notes: &mut NoteStore,
    light: &mut LightController,
    lamp: &mut SimplePwm<'_, embassy_nrf::peripherals::PWM0>,
    wall_clock: &WallClock,
    sensors: &Sensors<'_>,
    lifecycle: &mut LifecycleManager,
    now: u64,
) {
    match action {
        Action::Render(page) => {
            render(panel, page, pages, notes, wall_clock, sensors, lifecycle, now);
        }
        Action::ToggleLamp => {
            // Manual override; the next automatic cycle wins it back.
            let level = light.manual_toggle();
            lamp.set_duty(0, level as u16);
        }
        Action::ToggleRadio => {
            let enabled = lifecycle.toggle_radio(now);
            RADIO_CONTROL.signal(if enabled {
                RadioControl::Enable
            } else {
                RadioControl::Disable
            });
            info!("BLE channel {}", if enabled { "enabled" } else { "disabled" });
            render(panel, Page::Dashboard, pages, notes, wall_clock, sensors, lifecycle, now);
        }
    }
}

/// Build the view for `page` and paint it.
#[allow(clippy::too_many_arguments)]
fn render(
    panel: &mut EinkPanel,
    page: Page,
    pages: &PageMachine,
    notes: &NoteStore,
    wall_clock: &WallClock,
    sensors: &Sensors<'_>,
    lifecycle: &LifecycleManager,
    now: u64,
) {
    match page {
        Page::Dashboard => {
            let clock = wall_clock.hhmm(now);
            display::draw_dashboard(
                panel,
                &DashboardView {
                    clock: clock.as_str(),
                    battery_percent: sensors.battery_percent(),
                    radio_enabled: lifecycle.radio_enabled(),
                    note_count: notes.count(),
                },
            );
        }
        Page::NotesList => {
            let mut list: Vec<&str, MAX_NOTES> = Vec::new();
            for i in 0..notes.count() {
                let _ = list.push(notes.read(i));
            }
            display::draw_notes_list(
                panel,
                &NotesListView {
                    notes: &list,
                    selected: pages.selected_note(),
                },
            );
        }
        Page::NoteView => {
            display::draw_note(
                panel,
                &NoteDetailView {
                    index: pages.selected_note(),
                    // Out-of-range selection reads back empty, drawn as
                    // a blank note.
                    text: notes.read(pages.selected_note()),
                },
            );
        }
        Page::System => {
            display::draw_system(
                panel,
                &SystemInfoView {
                    battery_volts: sensors.battery_volts(),
                    note_count: notes.count(),
                    note_capacity: MAX_NOTES,
                    uptime_secs: now / 1000,
                },
            );
        }
    }
}

/// Final render, arm the wake pin, System OFF. Does not return.
async fn enter_sleep(
    panel: &mut EinkPanel,
    pages: &PageMachine,
    notes: &NoteStore,
    wall_clock: &WallClock,
    sensors: &Sensors<'_>,
    lifecycle: &LifecycleManager,
    now: u64,
) -> ! {
    info!("idle timeout - entering System OFF");

    // The dashboard stays legible on the glass while asleep.
    render(panel, Page::Dashboard, pages, notes, wall_clock, sensors, lifecycle, now);
    Timer::after(Duration::from_millis(PRE_SLEEP_DELAY_MS)).await;

    // Arm the button (P0.24, active low) as the sole wake source.
    let p0 = unsafe { &*embassy_nrf::pac::P0::ptr() };
    p0.pin_cnf[24]
        .write(|w| w.dir().input().input().connect().pull().pullup().sense().low());

    // Terminal: wake is a full reset back through main().
    unsafe {
        nrf_softdevice::raw::sd_power_system_off();
    }
    loop {
        cortex_m::asm::wfe();
    }
}
