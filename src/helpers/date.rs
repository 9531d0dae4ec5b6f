//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime, TimeZone, Utc};

/// Parse a CMS timestamp.
///
/// Prismic writes offsets without a colon (`2021-03-15T19:25:28+0000`), so
/// RFC 3339 is tried first and the `%z` forms after it.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::<FixedOffset>::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|d| d.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|d| d.and_utc())
        })
        .ok()
}

/// Map a language tag such as `pt-BR` to a chrono locale
pub fn locale_for(language: &str) -> Locale {
    match language.replace('-', "_").as_str() {
        "pt" | "pt_BR" => Locale::pt_BR,
        "pt_PT" => Locale::pt_PT,
        "en" | "en_US" => Locale::en_US,
        "en_GB" => Locale::en_GB,
        "es" | "es_ES" => Locale::es_ES,
        "fr" | "fr_FR" => Locale::fr_FR,
        "de" | "de_DE" => Locale::de_DE,
        _ => {
            tracing::warn!("Unsupported language '{}', falling back to pt_BR", language);
            Locale::pt_BR
        }
    }
}

/// Format a date with a date-fns style pattern in the given timezone
///
/// # Examples
/// ```ignore
/// format_date(&date, &Sao_Paulo, "dd MMM yyyy", Locale::pt_BR) // -> "15 mar 2021"
/// ```
pub fn format_date<Tz: TimeZone>(
    date: &DateTime<Utc>,
    tz: &Tz,
    pattern: &str,
    locale: Locale,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = datefns_to_chrono_format(pattern);
    date.with_timezone(tz)
        .format_localized(&chrono_format, locale)
        .to_string()
}

/// Convert a date-fns format string to chrono's strftime syntax.
///
/// Text between single quotes is copied literally (`''` is a quote).
fn datefns_to_chrono_format(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while chars.get(i + run) == Some(&c) {
            run += 1;
        }

        let spec = match (c, run) {
            ('y', 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', 1) => Some("%-d"),
            ('d', _) => Some("%d"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', 1) => Some("%-I"),
            ('h', _) => Some("%I"),
            ('m', 1) => Some("%-M"),
            ('m', _) => Some("%M"),
            ('s', 1) => Some("%-S"),
            ('s', _) => Some("%S"),
            ('E', 4) => Some("%A"),
            ('E', _) => Some("%a"),
            ('a', _) => Some("%p"),
            _ => None,
        };

        match spec {
            Some(spec) => out.push_str(spec),
            None => (0..run).for_each(|_| push_literal(&mut out, c)),
        }
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn test_parse_prismic_timestamp() {
        let date = parse_timestamp("2021-03-15T19:25:28+0000").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2021, 3, 15, 19, 25, 28).unwrap());

        let date = parse_timestamp("2021-03-15T19:25:28-03:00").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2021, 3, 15, 22, 25, 28).unwrap());

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_datefns_to_chrono() {
        assert_eq!(datefns_to_chrono_format("dd MMM yyyy"), "%d %b %Y");
        assert_eq!(datefns_to_chrono_format("HH:mm"), "%H:%M");
        assert_eq!(
            datefns_to_chrono_format("'* editado em' dd MMM yyyy', às' HH:mm"),
            "* editado em %d %b %Y, às %H:%M"
        );
        assert_eq!(datefns_to_chrono_format("'100%' yyyy"), "100%% %Y");
    }

    #[test]
    fn test_format_date_uses_timezone() {
        // 01:30 UTC is still the previous day in São Paulo (UTC-3)
        let date = Utc.with_ymd_and_hms(2021, 3, 16, 1, 30, 0).unwrap();
        assert_eq!(
            format_date(&date, &Sao_Paulo, "dd/MM/yyyy HH:mm", Locale::pt_BR),
            "15/03/2021 22:30"
        );
    }

    #[test]
    fn test_format_date_pt_br_month() {
        let date = Utc.with_ymd_and_hms(2021, 3, 15, 19, 25, 28).unwrap();
        let formatted = format_date(&date, &Sao_Paulo, "dd MMM yyyy", Locale::pt_BR);
        assert_eq!(formatted, "15 mar 2021");
    }

    #[test]
    fn test_locale_for() {
        assert_eq!(locale_for("pt-BR"), Locale::pt_BR);
        assert_eq!(locale_for("en_US"), Locale::en_US);
        assert_eq!(locale_for("tlh"), Locale::pt_BR);
    }
}
