use clap::builder::{styling::AnsiColor, Styles};
use clap::{ArgAction, Parser};

use crate::pws::BASE_URL;

const ABOUT: &str = "Personal weather station report";

const LONG_ABOUT: &str = "
Print the current conditions reported by a personal weather station on the weather.com network.

The user supplies the station identifier (e.g. KMAHANOV10) and a weather.com API key. The key is
usually given through the WGROUND_API_KEY environment variable.

The weather station is saved, so subsequent runs of `wground` will use the last station unless
otherwise specified.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(env = "WGROUND_STATION", help = "Weather station identifier (e.g. KMAHANOV10)")]
    pub station: Option<String>,

    #[arg(long, env = "WGROUND_API_KEY", hide_env_values = true, help = "weather.com API key")]
    pub api_key: Option<String>,

    #[arg(long, env = "WGROUND_BASE_URL", default_value = BASE_URL, hide = true)]
    pub base_url: String,

    #[arg(short, long, help = "Keep a live dashboard open instead of printing once")]
    pub watch: bool,

    #[arg(long, default_value_t = 300, value_name = "SECS", help = "Dashboard refresh interval")]
    pub refresh: u64,

    #[arg(long, help = "Print the report without colors")]
    pub no_color: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Log more to stderr (-v, -vv, -vvv)")]
    pub verbose: u8,
}
