//! GATT command service and the BLE task.
//!
//! SoftDevice S140 peripheral role. The service is deliberately tiny:
//! one characteristic, write and write-without-response, carrying an
//! opaque command string for `crate::command` to parse. Writes are
//! forwarded to [`COMMAND_QUEUE`]; a full queue drops the write (the
//! peer gets no acknowledgment path anyway and the loop drains at
//! 100 Hz, so this only fires under abuse).

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use nrf_softdevice::ble::advertisement_builder::{
    Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
};
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::{raw, Softdevice};

use crate::ble::{CommandBytes, RadioControl, COMMAND_QUEUE, RADIO_CONTROL};
use crate::config::BLE_DEVICE_NAME;
use crate::error::{BleError, Error};

// Vendor-specific 128-bit UUIDs for the command service/characteristic.
#[nrf_softdevice::gatt_service(uuid = "6e400001-b5a3-f393-e0a9-e50e24dcca9e")]
pub struct CommandService {
    #[characteristic(uuid = "6e400002-b5a3-f393-e0a9-e50e24dcca9e", write, write_without_response)]
    command: CommandBytes,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub command: CommandService,
}

/// SoftDevice configuration for a single-link peripheral.
pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Background SoftDevice runner.
#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// The command-channel task.
///
/// Sits idle until the control loop signals `Enable`, then advertises
/// and serves one connection at a time until `Disable` arrives.
/// Disabling mid-connection drops the link; that is the resource
/// release the lifecycle manager relies on before it will sleep.
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
        .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
        .services_128(ServiceList::Complete, &[[
            0x9e, 0xca, 0xdc, 0x24, 0x0e, 0xe5, 0xa9, 0xe0,
            0x93, 0xf3, 0xa3, 0xb5, 0x01, 0x00, 0x40, 0x6e,
        ]])
        .full_name(BLE_DEVICE_NAME)
        .build();

    static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new().build();

    loop {
        // Parked until the loop enables the channel.
        while RADIO_CONTROL.wait().await != RadioControl::Enable {}
        info!("BLE: channel enabled, advertising");

        'enabled: loop {
            let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
                adv_data: &ADV_DATA,
                scan_data: &SCAN_DATA,
            };
            let config = peripheral::Config::default();

            let conn = match select(
                peripheral::advertise_connectable(sd, adv, &config),
                RADIO_CONTROL.wait(),
            )
            .await
            {
                Either::First(Ok(conn)) => conn,
                Either::First(Err(e)) => {
                    warn!("BLE: {:?} ({:?})", Error::from(BleError::AdvertiseFailed), e);
                    break 'enabled;
                }
                Either::Second(RadioControl::Disable) => break 'enabled,
                Either::Second(RadioControl::Enable) => continue 'enabled,
            };

            info!("BLE: peer connected");

            let served = gatt_server::run(&conn, server, |e| match e {
                ServerEvent::Command(CommandServiceEvent::CommandWrite(value)) => {
                    if COMMAND_QUEUE.try_send(value).is_err() {
                        warn!("BLE: command queue full, write dropped");
                    }
                }
            });

            match select(served, RADIO_CONTROL.wait()).await {
                Either::First(_) => {
                    // Peer went away; go back to advertising.
                    info!("BLE: peer disconnected");
                }
                Either::Second(RadioControl::Disable) => {
                    // Dropping `conn` releases the link.
                    break 'enabled;
                }
                Either::Second(RadioControl::Enable) => {}
            }
        }

        info!("BLE: channel disabled");
    }
}
