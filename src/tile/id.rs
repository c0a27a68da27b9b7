use std::fmt;

/// Southwest corner of an SRTM tile in whole degrees, parsed from file names
/// like `S01W079.hgt`. The tile covers [lat, lat+1] x [lon, lon+1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileId {
    pub lat: i32,
    pub lon: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileNameError {
    name: String,
}

impl fmt::Display for TileNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid HGT tile name: {}", self.name)
    }
}

impl std::error::Error for TileNameError {}

impl TileId {
    /// Parses a tile file name of the fixed form `[NS]DD[EW]DDD.hgt`,
    /// case-insensitive. Anything else is rejected.
    pub fn from_name(name: &str) -> Result<TileId, TileNameError> {
        let err = || TileNameError {
            name: name.to_string(),
        };

        let bytes = name.as_bytes();
        // N00W079.hgt -> 7 name bytes + 4 extension bytes
        if bytes.len() != 11 || !bytes[7..].eq_ignore_ascii_case(b".hgt") {
            return Err(err());
        }

        let lat_sign = match bytes[0].to_ascii_uppercase() {
            b'N' => 1,
            b'S' => -1,
            _ => return Err(err()),
        };
        let lon_sign = match bytes[3].to_ascii_uppercase() {
            b'E' => 1,
            b'W' => -1,
            _ => return Err(err()),
        };

        let lat = parse_digits(&bytes[1..3]).ok_or_else(err)? * lat_sign;
        let lon = parse_digits(&bytes[4..7]).ok_or_else(err)? * lon_sign;

        if !(-90..=90).contains(&lat) || !(-180..=180).contains(&lon) {
            return Err(err());
        }

        Ok(TileId { lat, lon })
    }

    pub fn sw_corner(&self) -> (f64, f64) {
        (self.lat as f64, self.lon as f64)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{}{:03}",
            if self.lat < 0 { 'S' } else { 'N' },
            self.lat.abs(),
            if self.lon < 0 { 'W' } else { 'E' },
            self.lon.abs()
        )
    }
}

fn parse_digits(bytes: &[u8]) -> Option<i32> {
    let mut value = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (b - b'0') as i32;
    }
    Some(value)
}
