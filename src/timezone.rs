use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Format of the local time inputs.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const SHORT_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const CLOCK_FORMAT: &str = "%H:%M";

pub fn parse_local(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    NaiveDateTime::parse_from_str(input, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(input, SHORT_INPUT_FORMAT))
        .ok()
}

/// Interprets `input` as wall-clock time in `tz`. Times skipped by a DST transition do
/// not exist and yield `None`; repeated times resolve to the earlier instant.
pub fn local_to_utc(input: &str, tz: Tz) -> Option<NaiveDateTime> {
    let local = parse_local(input)?;

    tz.from_local_datetime(&local)
        .earliest()
        .map(|time| time.naive_utc())
}

pub fn utc_to_local(utc: NaiveDateTime, tz: Tz) -> String {
    tz.from_utc_datetime(&utc).format(INPUT_FORMAT).to_string()
}

pub fn clock(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format(CLOCK_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneClock {
    pub zone: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clocks {
    pub selected: ZoneClock,
    pub browser: ZoneClock,
    pub bot: ZoneClock,
}

/// The three zones the dashboard juggles: the local one, the one stored for the user by
/// the bot, and whichever of the two times are currently displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneSelection {
    browser: Tz,
    bot: Tz,
    selected: Tz,
}

impl TimezoneSelection {
    pub fn new(browser: Tz) -> Self {
        Self {
            browser,
            bot: Tz::UTC,
            selected: browser,
        }
    }

    pub fn browser(&self) -> Tz {
        self.browser
    }

    pub fn bot(&self) -> Tz {
        self.bot
    }

    pub fn selected(&self) -> Tz {
        self.selected
    }

    pub fn set_bot(&mut self, tz: Tz) {
        self.bot = tz;
    }

    pub fn use_bot(&mut self) {
        self.selected = self.bot;
    }

    pub fn use_browser(&mut self) {
        self.selected = self.browser;
    }

    pub fn clocks(&self, now: DateTime<Utc>) -> Clocks {
        let zone_clock = |tz: Tz| ZoneClock {
            zone: tz.name().to_string(),
            time: clock(now, tz),
        };

        Clocks {
            selected: zone_clock(self.selected),
            browser: zone_clock(self.browser),
            bot: zone_clock(self.bot),
        }
    }
}
