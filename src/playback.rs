use std::io;
use std::path::Path;

use log::info;
use sonoff433::{Decoder, DecoderState};

use crate::decode::print_code;
use crate::vcdutils::vcdfile_to_vec;

/// Replay a captured vcd waveform through the frame decoder and print
/// every code found in it.
pub fn play_saved_vcd(path: &Path, bits: u8) -> io::Result<()> {
    let (tick_us, vcdvec) = vcdfile_to_vec(path)?;

    info!(
        "replaying vcd file, {} edges, tick = {}µs",
        vcdvec.len(),
        tick_us
    );

    let mut decoder = Decoder::with_code_bits(bits);
    let mut found = 0;

    let mut prev = 0;
    for (t, _level) in vcdvec {
        let t = t * u64::from(tick_us);
        let dt = (t - prev) as u32;
        prev = t;

        if let DecoderState::Done(code) = decoder.interval(dt) {
            print_code(code, bits);
            found += 1;
            decoder.reset();
        }
    }

    if found == 0 {
        println!("No code decoded");
    }

    Ok(())
}
