//! ICS feed fixtures shaped like the feeds the dashboard actually consumes.

/// Google-style export: UTC times, folded description, escaped text.
pub const GOOGLE_FEED: &str = "\
BEGIN:VCALENDAR\r\n\
PRODID:-//Google Inc//Google Calendar 70.9054//EN\r\n\
VERSION:2.0\r\n\
X-WR-CALNAME:Launches\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20260123T140000Z\r\n\
DTEND:20260123T150000Z\r\n\
UID:launch-1@google.com\r\n\
SUMMARY:Orbital launch\\, attempt 2\r\n\
DESCRIPTION:Static fire complete.\\nWeather 80% go. Range opens at T-4h and \r\n\
 closes at T+2h.\r\n\
LOCATION:LC-39A\\; Kennedy Space Center\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20260201\r\n\
DTEND;VALUE=DATE:20260202\r\n\
SUMMARY:Review day\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Outlook-style export: Windows zone names, a VALARM, a VTIMEZONE block.
pub const OUTLOOK_FEED: &str = "\
BEGIN:VCALENDAR\r\n\
PRODID:-//Microsoft Corporation//Outlook 16.0 MIMEDIR//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Eastern Standard Time\r\n\
BEGIN:STANDARD\r\n\
DTSTART:16010101T020000\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Board meeting\r\n\
DTSTART;TZID=Eastern Standard Time:20260715T100000\r\n\
DTEND;TZID=Eastern Standard Time:20260715T113000\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
DESCRIPTION:Reminder\r\n\
TRIGGER:-PT15M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// Airbnb-style export: date-only reservations, a category per event.
pub const AIRBNB_FEED: &str = "\
BEGIN:VCALENDAR\r\n\
PRODID:-//Airbnb Inc//Hosting Calendar 1.0//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20260310\r\n\
DTEND;VALUE=DATE:20260315\r\n\
SUMMARY:Reserved\r\n\
CATEGORIES:MAIN\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20260320\r\n\
DTEND;VALUE=DATE:20260322\r\n\
SUMMARY:Airbnb (Not available)\r\n\
CATEGORIES:Blocked\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// A qualifier neither the alias table nor the zone database knows.
pub const UNKNOWN_ZONE_FEED: &str = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Mission control sync\r\n\
DTSTART;TZID=Mars Coordinated Time:20260123T120000\r\n\
DTEND;TZID=Mars Coordinated Time:20260123T130000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

/// A calendar without events.
pub const EMPTY_CALENDAR: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//Example//EN\r\n\
END:VCALENDAR\r\n";

/// Builds a single-event calendar from its fields.
pub fn single_event(summary: &str, description: &str, location: &str, start: &str, end: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\n\
         BEGIN:VEVENT\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         LOCATION:{location}\r\n\
         DTSTART:{start}\r\n\
         DTEND:{end}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    )
}
