use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::info;
use sonoff433::{Decoder, DecoderState};

use crate::vcdutils::VcdWriter;

pub fn print_code(code: u32, bits: u8) {
    let width = (usize::from(bits) + 3) / 4;
    println!("Code: 0x{:01$X}", code, width);
}

/// Read a whitespace-separated listing of µs durations from a file, or
/// from stdin when no path is given.
fn read_durations(path: Option<&Path>) -> io::Result<Vec<u32>> {
    let mut text = String::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_string(&mut text)?;
        }
        None => {
            io::stdin().read_to_string(&mut text)?;
        }
    }

    text.split_whitespace()
        .map(|tok| {
            tok.parse::<u32>().map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("bad duration: {:?}", tok),
                )
            })
        })
        .collect()
}

pub fn command_decode(path: Option<&Path>, bits: u8) -> io::Result<()> {
    let durations = read_durations(path)?;

    info!("decoding {} durations", durations.len());

    let mut decoder = Decoder::with_code_bits(bits);
    let mut found = 0;

    for dt in durations {
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

pub fn command_to_vcd(input: &Path, output: &Path) -> io::Result<()> {
    let durations = read_durations(Some(input))?;

    let mut file = File::create(output)?;
    let mut vcd = VcdWriter::new(&mut file);
    vcd.init()?;
    vcd.write_slice(&durations)?;

    info!(
        "wrote {} edges to {}",
        durations.len(),
        output.display()
    );

    Ok(())
}
