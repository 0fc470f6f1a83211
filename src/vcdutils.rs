use std::fs::File;
use std::io;
use std::io::ErrorKind::InvalidInput;
use std::path::Path;

use vcd::{self, SimulationCommand, TimescaleUnit, Value};

pub struct VcdWriter<'a> {
    vcd: vcd::Writer<&'a mut File>,
    timestamp: u64,
    wire_id: vcd::IdCode,
}

impl<'a> VcdWriter<'a> {
    /// Create a new vcd writer
    pub fn new(file: &'a mut File) -> Self {
        let vcd = vcd::Writer::new(file);

        Self {
            vcd,
            timestamp: 0,
            wire_id: vcd::IdCode::FIRST,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        let writer = &mut self.vcd;

        // Write the header. Durations are in µs, so one tick is one µs.
        writer.timescale(1, TimescaleUnit::US)?;
        writer.add_module("top")?;

        // Add the wire
        let id = writer.add_wire(1, "data")?;
        self.wire_id = id;

        writer.upscope()?;
        writer.enddefinitions()?;

        // Write the initial values
        writer.begin(SimulationCommand::Dumpvars)?;
        writer.change_scalar(id, Value::V0)?;
        writer.end()?;

        Ok(())
    }

    /// Write a slice of inter-edge durations as an alternating-level
    /// waveform. The decoder only looks at the spacing, so the
    /// starting level is arbitrary.
    pub fn write_slice<T: Copy + Into<u64>>(&mut self, v: &[T]) -> io::Result<()> {
        let v2: Vec<u64> = v
            .iter()
            .map(|v| (*v).into())
            .scan(0, |state, delta: u64| {
                *state += delta;
                Some(*state)
            })
            .collect();

        let mut level = true;
        for ts in &v2 {
            self.write_value(*ts, level)?;
            level = !level;
        }

        self.add_offset(v2.last().unwrap_or(&0) + 2000);

        Ok(())
    }

    pub fn write_value(&mut self, ts: u64, high: bool) -> io::Result<()> {
        let offseted_ts = self.timestamp + ts;

        self.vcd.timestamp(offseted_ts)?;
        let value = if high { Value::V1 } else { Value::V0 };
        self.vcd.change_scalar(self.wire_id, value)?;

        Ok(())
    }

    pub fn add_offset(&mut self, offset: u64) {
        self.timestamp += offset;
    }
}

/// Read a vcd file back into `(timestamp, level)` pairs, together with
/// the file's tick length in µs.
pub fn vcdfile_to_vec(path: &Path) -> io::Result<(u32, Vec<(u64, bool)>)> {
    let file = File::open(path)?;
    let mut parser = vcd::Parser::new(&file);

    // Parse the header and find the wire
    let header = parser.parse_header()?;
    let data = header
        .find_var(&["top", "data"])
        .ok_or_else(|| io::Error::new(InvalidInput, "no wire top.data"))?
        .code;

    let tick_us = match header.timescale {
        Some((ts, TimescaleUnit::US)) => ts,
        Some((ts, TimescaleUnit::MS)) => ts * 1000,
        Some((_, unit)) => {
            return Err(io::Error::new(
                InvalidInput,
                format!("unsupported timescale unit: {}", unit),
            ))
        }
        None => 1,
    };

    // Iterate through the remainder of the file and collect the edges
    let mut current_ts = 0;
    let mut res: Vec<(u64, bool)> = Vec::new();

    for command_result in parser {
        use vcd::Command::*;
        let command = command_result?;
        match command {
            ChangeScalar(i, v) if i == data => {
                let one = v == Value::V1;
                res.push((current_ts, one));
            }
            Timestamp(ts) => current_ts = ts,
            _ => (),
        }
    }

    Ok((tick_us, res))
}
