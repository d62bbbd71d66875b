// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use telemetry::Reading;

/// The sink lock shared by all workers. Owned by the coordinator and
/// passed to each consumer at construction; the producer never touches it.
pub type SharedSink = Arc<Mutex<CsvSink>>;

/// CSV output file, one `id,value,timestamp` line per reading.
///
/// Not internally thread safe; workers serialize through [`SharedSink`].
pub struct CsvSink {
    writer: BufWriter<File>,
}

impl CsvSink {
    pub fn create<P: AsRef<Path>>(path: P, append: bool) -> io::Result<Self> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };
        Ok(CsvSink {
            writer: BufWriter::new(file),
        })
    }

    /// Write one reading and flush it to the file. Flushing per record
    /// trades throughput for durability of already-written lines.
    pub fn write_reading(&mut self, reading: &Reading) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{:.2},{}",
            reading.id, reading.value, reading.timestamp
        )?;
        self.writer.flush()
    }
}
