use std::ffi::CStr;
use std::fmt;
use std::str::FromStr;

use super::{IpAddress, SocketAddrV4, SocketAddrV6};
use crate::error::AddrError;

/// Buffer size that fits the longest rendering plus its NUL
/// (`INET6_ADDRSTRLEN`).
pub const TEXT_LEN: usize = 46;

// Not exported by the libc crate.
unsafe extern "C" {
	fn inet_ntop(
		af: libc::c_int,
		src: *const libc::c_void,
		dst: *mut libc::c_char,
		size: libc::socklen_t,
	) -> *const libc::c_char;

	fn inet_pton(af: libc::c_int, src: *const libc::c_char, dst: *mut libc::c_void) -> libc::c_int;
}

impl IpAddress {
	/// Renders the address, not the port, into `buf`.
	///
	/// Dotted quad for IPv4, compressed colon-hex for IPv6. Mapped and
	/// compatible addresses keep their IPv4 part in dotted form.
	pub fn write_text<'a>(&self, buf: &'a mut [u8]) -> Result<&'a str, AddrError> {
		let available = buf.len();
		let size = libc::socklen_t::try_from(available).unwrap_or(libc::socklen_t::MAX);
		let (af, src) = match self {
			IpAddress::V4(a) => (libc::AF_INET, a.octets().as_ptr()),
			IpAddress::V6(a) => (libc::AF_INET6, a.octets().as_ptr()),
		};

		let dst = buf.as_mut_ptr() as *mut libc::c_char;
		let result = unsafe { inet_ntop(af, src as *const libc::c_void, dst, size) };
		if result.is_null() {
			return Err(AddrError::BufferTooSmall { available });
		}

		let len = unsafe { CStr::from_ptr(result) }.to_bytes().len();
		// SAFETY: inet_ntop only writes ASCII digits, hex letters, ':' and '.'
		Ok(unsafe { std::str::from_utf8_unchecked(&buf[..len]) })
	}

	/// Like `write_text`, for callers that only branch on success.
	pub fn to_text<'a>(&self, buf: &'a mut [u8]) -> Option<&'a str> {
		self.write_text(buf).ok()
	}

	/// Parses a dotted quad or an IPv6 literal. The port is 0.
	pub fn from_text(src: &str) -> Option<IpAddress> {
		let bytes = src.as_bytes();
		if bytes.len() >= TEXT_LEN || bytes.contains(&0) {
			return None;
		}

		let mut cstr = [0u8; TEXT_LEN];
		cstr[..bytes.len()].copy_from_slice(bytes);
		let ptr = cstr.as_ptr() as *const libc::c_char;

		let mut v4 = [0u8; 4];
		if unsafe { inet_pton(libc::AF_INET, ptr, v4.as_mut_ptr() as *mut libc::c_void) } == 1 {
			return Some(IpAddress::V4(SocketAddrV4::new(v4, 0)));
		}

		let mut v6 = [0u8; 16];
		if unsafe { inet_pton(libc::AF_INET6, ptr, v6.as_mut_ptr() as *mut libc::c_void) } == 1 {
			return Some(IpAddress::V6(SocketAddrV6::new(v6, 0)));
		}

		None
	}
}

impl FromStr for IpAddress {
	type Err = AddrError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		IpAddress::from_text(s).ok_or_else(|| AddrError::Parse { input: s.to_owned() })
	}
}

impl fmt::Display for IpAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut buf = [0u8; TEXT_LEN];
		let text = self.write_text(&mut buf).map_err(|_| fmt::Error)?;
		f.write_str(text)
	}
}
