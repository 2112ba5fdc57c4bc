// SPDX-License-Identifier: MPL-2.0
use iced_parking::app::{self, paths, Flags};
use iced_parking::map::ProviderKind;
use std::path::PathBuf;

const HELP: &str = "\
iced_parking - list a parking space and pick its location on a map

USAGE:
  iced_parking [OPTIONS]

OPTIONS:
  --lang <id>              Interface language (e.g. en-US, fr)
  --provider <kind>        Tile provider: open-tiles or token-gated
  --config-dir <path>      Directory holding settings.toml
  --data-dir <path>        Directory for application data
  --i18n-dir <path>        Extra directory of .ftl translation files
  --diagnostics-out <path> Write a diagnostics report there on exit
  --diagnostics            Write the report to the data directory on exit
  -h, --help               Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let provider = match args.opt_value_from_str::<_, ProviderKind>("--provider") {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("Ignoring --provider: {err}");
            None
        }
    };

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        provider,
        i18n_dir: args.opt_value_from_str("--i18n-dir").unwrap_or(None),
        data_dir: args.opt_value_from_str("--data-dir").unwrap_or(None),
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or(None),
        diagnostics_out: args
            .opt_value_from_os_str("--diagnostics-out", |s| {
                Ok::<_, std::convert::Infallible>(PathBuf::from(s))
            })
            .unwrap_or(None),
        diagnostics: args.contains("--diagnostics"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Ignoring unexpected arguments: {remaining:?}");
    }

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    app::run(flags)
}
