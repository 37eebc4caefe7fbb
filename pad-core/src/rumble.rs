//! Rumble-pak presence probe.
//!
//! Whether the device can rumble depends on the pak attached to it: only
//! paks with a motor fitted carry one of the two motorized device-type
//! codes in their header. The probe runs once at startup; the result is
//! cached in the session and advertised in every identification response.

/// Bytes of the pak header the probe needs to see.
pub const PAK_HEADER_LEN: usize = 0xC0;

/// Offset of the fixed header byte every valid pak carries.
const CHECK_OFFSET: usize = 0xB2;

/// Expected value at [`CHECK_OFFSET`].
const CHECK_VALUE: u8 = 0x96;

/// Offset of the device-type code within the header.
const TYPE_CODE_OFFSET: usize = 0xAC;

/// Probe the attached pak header for a rumble motor.
///
/// Returns `true` only if the header is long enough, its fixed byte
/// matches, and the device-type code is one of the two motorized variants.
/// A missing or garbage header reads as "no motor".
#[must_use]
pub fn rumble_pak_present(header: &[u8]) -> bool {
    if header.len() < PAK_HEADER_LEN {
        return false;
    }
    header[CHECK_OFFSET] == CHECK_VALUE && matches!(header[TYPE_CODE_OFFSET], b'R' | b'V')
}
