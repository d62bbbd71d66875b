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

//! Sensor reading data unit and the fixed-width binary wire format.

use std::io::{self, Read};

/// Reserved sensor id marking the end of a stream. Never valid sensor data.
pub const SENTINEL_ID: u16 = 0;

/// On-wire size of one reading: id, value, timestamp, little endian,
/// no header or delimiter between records.
pub const WIRE_SIZE: usize =
    std::mem::size_of::<u16>() + std::mem::size_of::<f64>() + std::mem::size_of::<i64>();

/// One sensor reading. Plain data, moved by value between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub id: u16,
    pub value: f64,
    pub timestamp: i64,
}

impl Reading {
    /// The end-of-stream marker. One per consumer must be enqueued at
    /// producer shutdown.
    pub fn sentinel() -> Reading {
        Reading {
            id: SENTINEL_ID,
            value: 0.0,
            timestamp: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_ID
    }

    pub fn from_wire(buf: &[u8; WIRE_SIZE]) -> Reading {
        let id = u16::from_le_bytes([buf[0], buf[1]]);
        let mut value = [0u8; 8];
        value.copy_from_slice(&buf[2..10]);
        let mut timestamp = [0u8; 8];
        timestamp.copy_from_slice(&buf[10..18]);
        Reading {
            id,
            value: f64::from_le_bytes(value),
            timestamp: i64::from_le_bytes(timestamp),
        }
    }

    pub fn to_wire(&self) -> [u8; WIRE_SIZE] {
        let mut buf = [0u8; WIRE_SIZE];
        buf[0..2].copy_from_slice(&self.id.to_le_bytes());
        buf[2..10].copy_from_slice(&self.value.to_le_bytes());
        buf[10..18].copy_from_slice(&self.timestamp.to_le_bytes());
        buf
    }
}

/// Iterator over the readings of a binary stream.
///
/// Yields `Ok(reading)` per complete record, ends cleanly when the stream
/// is exhausted at a record boundary, and yields a single `Err` (then ends)
/// when the stream stops mid-record.
pub struct ReadingReader<R> {
    source: R,
    done: bool,
}

impl<R: Read> ReadingReader<R> {
    pub fn new(source: R) -> Self {
        ReadingReader {
            source,
            done: false,
        }
    }

    fn read_record(&mut self) -> io::Result<Option<Reading>> {
        let mut buf = [0u8; WIRE_SIZE];
        let mut filled = 0;
        while filled < WIRE_SIZE {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("stream ended {filled} bytes into a {WIRE_SIZE}-byte record"),
                    ))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(Some(Reading::from_wire(&buf)))
    }
}

impl<R: Read> Iterator for ReadingReader<R> {
    type Item = io::Result<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(reading)) => Some(Ok(reading)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_wire_layout() {
        let reading = Reading {
            id: 0x0102,
            value: 1.0,
            timestamp: 0x0807060504030201,
        };
        let buf = reading.to_wire();

        assert_eq!(&buf[0..2], &[0x02, 0x01]);
        assert_eq!(&buf[2..10], &1.0f64.to_le_bytes());
        assert_eq!(
            &buf[10..18],
            &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
        assert_eq!(Reading::from_wire(&buf), reading);
    }

    #[test]
    fn test_sentinel_is_not_data() {
        assert!(Reading::sentinel().is_sentinel());
        assert!(!Reading {
            id: 1,
            value: 10.5,
            timestamp: 100
        }
        .is_sentinel());
    }

    #[test]
    fn test_reader_yields_records_in_order() {
        let readings = [
            Reading {
                id: 1,
                value: 10.5,
                timestamp: 100,
            },
            Reading {
                id: 2,
                value: 20.5,
                timestamp: 200,
            },
        ];
        let mut stream = Vec::new();
        for reading in &readings {
            stream.extend_from_slice(&reading.to_wire());
        }

        let decoded: Vec<Reading> = ReadingReader::new(Cursor::new(stream))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(decoded, readings);
    }

    #[test]
    fn test_reader_empty_stream() {
        let mut reader = ReadingReader::new(Cursor::new(Vec::new()));
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_reports_partial_tail_once() {
        let mut stream = Reading {
            id: 7,
            value: 3.25,
            timestamp: 42,
        }
        .to_wire()
        .to_vec();
        stream.extend_from_slice(&[0xaa, 0xbb, 0xcc]);

        let mut reader = ReadingReader::new(Cursor::new(stream));
        assert_eq!(reader.next().unwrap().unwrap().id, 7);

        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(reader.next().is_none());
    }
}
