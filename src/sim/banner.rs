//! HUD banners with epoch-tagged auto-hide
//!
//! An auto-hiding banner schedules a hide task carrying the session epoch
//! and the banner's serial. When the task comes due it only acts if both
//! still match; otherwise the session has moved on (new phase, restart,
//! newer banner) and the task is dropped.

use serde::{Deserialize, Serialize};

/// Banner flavours the HUD can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerKind {
    /// Detection meter filled
    Alert,
    /// Remaining enemies went vigilant
    HighAlert,
    /// Exit reached without every document
    ExitLocked,
    /// Failure
    Caught,
    LevelComplete,
    MissionComplete,
}

impl BannerKind {
    pub fn text(&self) -> &'static str {
        match self {
            BannerKind::Alert => "ALERT! You have been spotted",
            BannerKind::HighAlert => "HIGH ALERT - guards are on edge",
            BannerKind::ExitLocked => "Collect all documents first",
            BannerKind::Caught => "CAUGHT! Press R to restart",
            BannerKind::LevelComplete => "LEVEL COMPLETE - press E to continue",
            BannerKind::MissionComplete => "MISSION ACCOMPLISHED!",
        }
    }

    /// Text colour as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            BannerKind::Alert | BannerKind::Caught => 0xff4444,
            BannerKind::HighAlert | BannerKind::ExitLocked => 0xffaa00,
            BannerKind::LevelComplete | BannerKind::MissionComplete => 0x4caf50,
        }
    }
}

/// A banner currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    /// Session epoch it was shown in
    pub epoch: u64,
    serial: u64,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledHide {
    due_tick: u64,
    epoch: u64,
    serial: u64,
}

/// The visible banner plus pending hide tasks
#[derive(Debug, Clone, Default)]
pub struct BannerQueue {
    current: Option<Banner>,
    pending: Vec<ScheduledHide>,
    next_serial: u64,
}

impl BannerQueue {
    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// Number of hide tasks not yet fired or dropped
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Show a banner that stays until replaced or cleared
    pub fn show(&mut self, kind: BannerKind, epoch: u64) {
        self.next_serial += 1;
        self.current = Some(Banner {
            kind,
            epoch,
            serial: self.next_serial,
        });
    }

    /// Show a banner and schedule its hide `duration_ticks` after `now`
    pub fn show_for(&mut self, kind: BannerKind, epoch: u64, now: u64, duration_ticks: u64) {
        self.show(kind, epoch);
        self.pending.push(ScheduledHide {
            due_tick: now + duration_ticks,
            epoch,
            serial: self.next_serial,
        });
    }

    /// Run every hide task due at `now`
    ///
    /// A task only hides the banner it was scheduled for, and only while the
    /// session is still in the epoch it was scheduled from.
    pub fn fire_due(&mut self, now: u64, current_epoch: u64) {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.due_tick <= now);
        self.pending = waiting;

        for task in due {
            let still_valid = task.epoch == current_epoch
                && self
                    .current
                    .is_some_and(|b| b.serial == task.serial && b.epoch == task.epoch);
            if still_valid {
                self.current = None;
            } else {
                log::trace!("dropping stale banner hide (epoch {} vs {current_epoch})", task.epoch);
            }
        }
    }

    /// Remove the banner and forget every pending task
    pub fn clear(&mut self) {
        self.current = None;
        self.pending.clear();
    }
}
