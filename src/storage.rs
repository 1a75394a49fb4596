//! Persistent note storage.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage`
//! map so notes survive power loss and deep sleep. Wear levelling and
//! GC inside the reserved pages come from `sequential-storage`; we
//! make no further wear guarantees.
//!
//! Storage layout (integer record keys, one record per slot):
//!   - key 0:              note count, single byte
//!   - key 1..=MAX_NOTES:  slot text for index key-1, raw UTF-8
//!
//! On any multi-record mutation the count record is written last, so a
//! power cut mid-save leaves the old count governing whichever slots
//! made it - stale slot text beyond the count is invisible by the
//! store's validity rule.
//!
//! This module is generic over `NorFlash` and does no logging of its
//! own, so it runs unchanged against an in-memory flash in the host
//! tests; the embedded entry point logs the returned `Result`.

use crate::config::{MAX_NOTES, NOTE_MAX_LEN, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use crate::error::Error;
use crate::notes::NoteStore;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Record key of the note count.
const KEY_COUNT: u8 = 0;

/// Record key of slot `index`.
fn slot_key(index: usize) -> u8 {
    (index + 1) as u8
}

/// Working buffer: the largest record is one slot text.
const MAX_RECORD_SIZE: usize = NOTE_MAX_LEN + 8;

/// Load the note store from flash. Absent or unreadable records read
/// as defaults (count 0 / empty slot) - a blank device is not an
/// error, so the store is always left consistent. `Err` means a flash
/// fault was papered over with defaults and is worth a log line.
pub async fn load_notes(
    store: &mut NoteStore,
    flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
) -> Result<(), Error> {
    let mut buf = [0u8; MAX_RECORD_SIZE];
    let mut degraded = false;

    let count = match fetch_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut NoCache::new(),
        &mut buf,
        &KEY_COUNT,
    )
    .await
    {
        Ok(Some(data)) if !data.is_empty() => (data[0] as usize).min(MAX_NOTES),
        Ok(_) => 0,
        Err(_) => {
            degraded = true;
            0
        }
    };

    store.clear_all();
    for index in 0..count {
        let mut buf = [0u8; MAX_RECORD_SIZE];
        match fetch_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &slot_key(index),
        )
        .await
        {
            Ok(Some(data)) => match core::str::from_utf8(data) {
                Ok(text) => store.append(text),
                // Invalid UTF-8 reads as a default, keeping the index
                // contiguous.
                Err(_) => store.append(""),
            },
            // Count said valid but the record is gone; same rule.
            Ok(None) => store.append(""),
            Err(_) => {
                store.append("");
                degraded = true;
            }
        }
    }

    if degraded {
        Err(Error::Storage)
    } else {
        Ok(())
    }
}

/// Persist the note store to flash: slots first, count record last.
/// A failed slot write returns before the count is touched, so the
/// previously stored count keeps governing.
pub async fn save_notes(
    store: &NoteStore,
    flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
) -> Result<(), Error> {
    let mut buf = [0u8; MAX_RECORD_SIZE];

    for index in 0..store.count() {
        let text = store.read(index).as_bytes();
        store_item::<u8, &[u8], _>(
            flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &slot_key(index),
            &text,
        )
        .await
        .map_err(|_| Error::Storage)?;
    }

    let count = [store.count() as u8];
    store_item::<u8, &[u8], _>(
        flash,
        STORAGE_START..STORAGE_END,
        &mut NoCache::new(),
        &mut buf,
        &KEY_COUNT,
        &count.as_slice(),
    )
    .await
    .map_err(|_| Error::Storage)
}
