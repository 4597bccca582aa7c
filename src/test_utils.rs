use crate::{Pretzel, parse_pretzel};

/// Parse a pretzel from braid or letter notation, panicking on malformed input.
pub fn pretzel(input: &str) -> Pretzel {
    parse_pretzel(input).unwrap_or_else(|e| panic!("bad test pretzel '{input}': {e}"))
}

/// Route `log` output through the test harness, one coloured line per record.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_test_logger() {
    use std::io::Write as _;
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .format(|buf, record| {
            // Ansi256 ref: https://hexdocs.pm/color_palette/ansi_color_codes.html
            let bg = anstyle::Ansi256Color(236);
            let level_style = buf
                .default_level_style(record.level())
                .bg_color(Some(bg.into()));
            let location = anstyle::Ansi256Color(250).on(bg);

            // Drop the crate prefix, "seifert::simplify" reads as "simplify".
            let module = record
                .module_path()
                .and_then(|m| m.rsplit("::").next())
                .unwrap_or("?");
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#}{location} {}:{} {location:#} {}",
                record.level(),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}
