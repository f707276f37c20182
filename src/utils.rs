#[cfg(test)]
pub mod test_fixtures {
    //! Minimal little-endian TIFF assembler, so the extractor can be
    //! exercised against in-memory images instead of fixture files.

    const BYTE: u16 = 1;
    const ASCII: u16 = 2;
    const LONG: u16 = 4;
    const RATIONAL: u16 = 5;

    const GPS_IFD_POINTER: u16 = 0x8825;

    struct Entry {
        tag: u16,
        kind: u16,
        count: u32,
        payload: Vec<u8>,
    }

    /// Builds a TIFF byte stream with an IFD0 and, when any GPS entries
    /// were added, a GPS sub-IFD reachable through the standard pointer
    /// tag. Entries are kept sorted by tag number as the format requires.
    #[derive(Default)]
    pub struct TiffFixture {
        ifd0: Vec<Entry>,
        gps: Vec<Entry>,
    }

    impl TiffFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ifd0_ascii(mut self, tag: u16, text: &str) -> Self {
            self.ifd0.push(ascii_entry(tag, text));
            self
        }

        pub fn gps_ascii(mut self, tag: u16, text: &str) -> Self {
            self.gps.push(ascii_entry(tag, text));
            self
        }

        pub fn gps_byte(mut self, tag: u16, data: &[u8]) -> Self {
            self.gps.push(Entry {
                tag,
                kind: BYTE,
                count: data.len() as u32,
                payload: data.to_vec(),
            });
            self
        }

        pub fn gps_rationals(mut self, tag: u16, values: &[(u32, u32)]) -> Self {
            let mut payload = Vec::with_capacity(values.len() * 8);
            for &(numerator, denominator) in values {
                payload.extend_from_slice(&numerator.to_le_bytes());
                payload.extend_from_slice(&denominator.to_le_bytes());
            }
            self.gps.push(Entry {
                tag,
                kind: RATIONAL,
                count: values.len() as u32,
                payload,
            });
            self
        }

        pub fn build(mut self) -> Vec<u8> {
            let gps_offset = 8 + ifd_len(self.ifd0.len() + usize::from(!self.gps.is_empty()));
            if !self.gps.is_empty() {
                self.ifd0.push(Entry {
                    tag: GPS_IFD_POINTER,
                    kind: LONG,
                    count: 1,
                    payload: (gps_offset as u32).to_le_bytes().to_vec(),
                });
            }
            self.ifd0.sort_by_key(|entry| entry.tag);
            self.gps.sort_by_key(|entry| entry.tag);

            let mut data_offset = gps_offset
                + if self.gps.is_empty() {
                    0
                } else {
                    ifd_len(self.gps.len())
                };

            let mut out = Vec::new();
            out.extend_from_slice(b"II\x2a\x00");
            out.extend_from_slice(&8u32.to_le_bytes());

            let mut data = Vec::new();
            write_ifd(&mut out, &mut data, &self.ifd0, &mut data_offset);
            if !self.gps.is_empty() {
                write_ifd(&mut out, &mut data, &self.gps, &mut data_offset);
            }
            out.extend_from_slice(&data);
            out
        }
    }

    fn ascii_entry(tag: u16, text: &str) -> Entry {
        let mut payload = text.as_bytes().to_vec();
        payload.push(0);
        Entry {
            tag,
            kind: ASCII,
            count: payload.len() as u32,
            payload,
        }
    }

    fn ifd_len(entries: usize) -> usize {
        2 + entries * 12 + 4
    }

    fn write_ifd(out: &mut Vec<u8>, data: &mut Vec<u8>, entries: &[Entry], data_offset: &mut usize) {
        out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for entry in entries {
            out.extend_from_slice(&entry.tag.to_le_bytes());
            out.extend_from_slice(&entry.kind.to_le_bytes());
            out.extend_from_slice(&entry.count.to_le_bytes());
            if entry.payload.len() <= 4 {
                let mut inline = [0u8; 4];
                inline[..entry.payload.len()].copy_from_slice(&entry.payload);
                out.extend_from_slice(&inline);
            } else {
                out.extend_from_slice(&(*data_offset as u32).to_le_bytes());
                data.extend_from_slice(&entry.payload);
                *data_offset += entry.payload.len();
                // Keep value offsets word-aligned.
                if entry.payload.len() % 2 == 1 {
                    data.push(0);
                    *data_offset += 1;
                }
            }
        }
        out.extend_from_slice(&0u32.to_le_bytes());
    }
}
