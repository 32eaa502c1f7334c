macro_rules! byte_map {
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident($byte:ident:$u8:ty) { $e:expr }
    } => {
        $(#[$meta])*
        $vis const fn $fn_id($byte: $u8) -> bool {
            static PAT: [bool; 256] = {
                let mut bytes = [false; 256];
                let mut $byte = 0u8;
                const fn filter($byte: $u8) -> bool {
                    $e
                }
                loop {
                    bytes[$byte as usize] = filter($byte);
                    if $byte == 255 {
                        break;
                    }
                    $byte += 1;
                }
                bytes
            };
            // SAFETY: the pattern size is equal to u8::MAX
            unsafe { *PAT.as_ptr().add($byte as usize) }
        }
    };
}

// ===== Blocks =====

byte_map! {
    /// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
    #[inline(always)]
    const fn unreserved(byte: u8) {
        byte.is_ascii_alphanumeric()
        || matches!(byte, b'-' | b'.' | b'_' | b'~')
    }
}

byte_map! {
    /// sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
    ///            / "*" / "+" / "," / ";" / "="
    #[inline(always)]
    const fn sub_delims(byte: u8) {
        matches!(
            byte,
            b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
        )
    }
}

/// obs-text = %x80-FF
#[inline(always)]
pub const fn is_obs_text(byte: u8) -> bool {
    byte >= 0x80
}

/// VCHAR = %x21-7E
#[inline(always)]
pub const fn is_vchar(byte: u8) -> bool {
    matches!(byte, b'!'..=b'~')
}

// ===== lookup table =====

byte_map! {
    /// token   = 1*tchar
    /// tchar   = "!" / "#" / "$" / "%" / "&" / "'" / "*"
    ///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
    ///         / DIGIT / ALPHA
    #[inline(always)]
    pub const fn is_token(byte: u8) {
        matches!(
            byte,
            | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
            | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
        || byte.is_ascii_alphanumeric()
    }
}

byte_map! {
    /// pchar = unreserved / sub-delims / ":" / "@"
    ///
    /// pct-encoded is excluded, the resolver validates `%XX` triplets itself.
    #[inline(always)]
    pub const fn is_pchar(byte: u8) {
        unreserved(byte) || sub_delims(byte) || matches!(byte, b':' | b'@')
    }
}

byte_map! {
    /// segment         = *pchar
    /// absolute-path   = 1*( "/" segment )
    #[inline(always)]
    pub const fn is_path(byte: u8) {
        is_pchar(byte) || matches!(byte, b'/')
    }
}

byte_map! {
    /// query = *( pchar / "/" / "?" )
    #[inline(always)]
    pub const fn is_query(byte: u8) {
        is_pchar(byte) || matches!(byte, b'/' | b'?')
    }
}

byte_map! {
    /// reg-name = *( unreserved / pct-encoded / sub-delims )
    #[inline(always)]
    pub const fn is_regname(byte: u8) {
        unreserved(byte) || sub_delims(byte)
    }
}

byte_map! {
    /// IP-literal contents, restricted to hex digits, ":" and "."
    #[inline(always)]
    pub const fn is_ipv6(byte: u8) {
        byte.is_ascii_hexdigit() || matches!(byte, b':' | b'.')
    }
}

byte_map! {
    /// Any byte allowed in a request-target before form resolution.
    ///
    /// The scan only needs to find the SP delimiter, the form resolver
    /// applies the per-form grammar afterwards.
    #[inline(always)]
    pub const fn is_target(byte: u8) {
        is_vchar(byte)
    }
}

byte_map! {
    /// field-value bytes: VCHAR / obs-text / SP / HTAB
    #[inline(always)]
    pub const fn is_field_value(byte: u8) {
        is_vchar(byte) || is_obs_text(byte) || matches!(byte, b' ' | b'\t')
    }
}

byte_map! {
    /// quoted-pair target: HTAB / SP / VCHAR / obs-text
    #[inline(always)]
    pub const fn is_escapable(byte: u8) {
        is_vchar(byte) || is_obs_text(byte) || matches!(byte, b' ' | b'\t')
    }
}
