use std::io;
use std::path::PathBuf;

use structopt::StructOpt;

mod decode;
mod playback;
mod vcdutils;

#[derive(Debug, StructOpt)]
#[structopt(name = "sonoff-rx", about = "Sonoff 433MHz remote code utility")]
struct Opt {
    #[structopt(short, long)]
    debug: bool,
    /// Code width in bits
    #[structopt(long, default_value = "24")]
    bits: u8,
    #[structopt(subcommand)]
    cmd: CliCommand,
}

#[derive(StructOpt, Debug)]
enum CliCommand {
    /// Playback vcd file through the decoder
    PlaybackVcd { path: PathBuf },
    /// Decode a listing of µs durations, from file or stdin
    Decode { path: Option<PathBuf> },
    /// Convert a duration listing to a vcd waveform
    ToVcd { input: PathBuf, output: PathBuf },
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let loglevel = if opt.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new().filter_level(loglevel).init();

    match opt.cmd {
        CliCommand::PlaybackVcd { path } => playback::play_saved_vcd(&path, opt.bits),
        CliCommand::Decode { path } => decode::command_decode(path.as_deref(), opt.bits),
        CliCommand::ToVcd { input, output } => decode::command_to_vcd(&input, &output),
    }
}
