//! Host name resolution.
//!
//! `SystemResolver` hands lookups to the platform's `getaddrinfo(3)` and
//! returns the answers as `IpAddress` values. Nothing here speaks DNS.

use std::ffi::{CStr, CString};

use log::{debug, trace};

use crate::addr::{Family, FromSockAddr, IpAddress};
use crate::error::{ResolveError, errno};

/// Longest host name accepted by `is_domain_name`, without the trailing dot.
const MAX_NAME_LEN: usize = 253;

/// Longest single label.
const MAX_LABEL_LEN: usize = 63;

/// Socket type a lookup is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SockKind {
	Stream,
	Datagram,
}

impl SockKind {
	#[inline]
	fn raw(self) -> libc::c_int {
		match self {
			SockKind::Stream => libc::SOCK_STREAM,
			SockKind::Datagram => libc::SOCK_DGRAM,
		}
	}
}

/// Lookup hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveHints {
	pub family: Option<Family>,
	pub socktype: Option<SockKind>,
	/// Return wildcard addresses when no host is given (`AI_PASSIVE`).
	pub passive: bool,
	/// Only accept address literals (`AI_NUMERICHOST`).
	pub numeric_host: bool,
}

impl ResolveHints {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn family(mut self, family: Family) -> Self {
		self.family = Some(family);
		self
	}

	pub fn socktype(mut self, socktype: SockKind) -> Self {
		self.socktype = Some(socktype);
		self
	}

	pub fn passive(mut self, enable: bool) -> Self {
		self.passive = enable;
		self
	}

	pub fn numeric_host(mut self, enable: bool) -> Self {
		self.numeric_host = enable;
		self
	}

	fn to_raw(&self) -> libc::addrinfo {
		let mut raw: libc::addrinfo = unsafe { std::mem::zeroed() };
		raw.ai_family = self.family.map_or(libc::AF_UNSPEC, Family::raw);
		raw.ai_socktype = self.socktype.map_or(0, SockKind::raw);
		if self.passive {
			raw.ai_flags |= libc::AI_PASSIVE;
		}
		if self.numeric_host {
			raw.ai_flags |= libc::AI_NUMERICHOST;
		}
		raw
	}
}

/// Anything that turns a host name into endpoints.
pub trait Resolver {
	/// Resolves `host` (and optionally `service`, a port number or service
	/// name) into endpoints, in the order the resolver returned them.
	fn resolve(
		&self,
		host: &str,
		service: Option<&str>,
		hints: &ResolveHints,
	) -> Result<Vec<IpAddress>, ResolveError>;
}

/// Resolver backed by `getaddrinfo(3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
	pub fn new() -> Self {
		Self
	}
}

/// Frees a `getaddrinfo` result list on drop.
struct AddrInfoList(*mut libc::addrinfo);

impl Drop for AddrInfoList {
	fn drop(&mut self) {
		if !self.0.is_null() {
			unsafe { libc::freeaddrinfo(self.0) };
		}
	}
}

impl Resolver for SystemResolver {
	fn resolve(
		&self,
		host: &str,
		service: Option<&str>,
		hints: &ResolveHints,
	) -> Result<Vec<IpAddress>, ResolveError> {
		let c_host = CString::new(host)
			.map_err(|_| ResolveError::InvalidInput { reason: "host contains a NUL byte" })?;
		let c_service = service
			.map(CString::new)
			.transpose()
			.map_err(|_| ResolveError::InvalidInput { reason: "service contains a NUL byte" })?;

		let raw_hints = hints.to_raw();
		let mut head: *mut libc::addrinfo = std::ptr::null_mut();

		debug!("getaddrinfo({}, {:?})", host, service);
		let ret = unsafe {
			libc::getaddrinfo(
				c_host.as_ptr(),
				c_service.as_ref().map_or(std::ptr::null(), |s| s.as_ptr()),
				&raw_hints,
				&mut head,
			)
		};
		let list = AddrInfoList(head);

		if ret == libc::EAI_SYSTEM {
			let errno = errno();
			debug!("getaddrinfo({}) failed: errno {}", host, errno);
			return Err(ResolveError::System { errno });
		}
		if ret != 0 {
			let message = gai_strerror(ret);
			debug!("getaddrinfo({}) failed: {}", host, message);
			return Err(ResolveError::Lookup { host: host.to_owned(), code: ret, message });
		}

		let mut resolved: Vec<IpAddress> = Vec::new();
		let mut current = list.0;
		while !current.is_null() {
			let info = unsafe { &*current };
			let addr = unsafe { IpAddress::from_sockaddr(info.ai_addr, info.ai_addrlen) };
			match addr {
				Some(addr) if !resolved.contains(&addr) => {
					trace!("{} -> {} port {}", host, addr, addr.port());
					resolved.push(addr);
				}
				Some(_) => {}
				None => trace!("{}: skipping family {}", host, info.ai_family),
			}
			current = info.ai_next;
		}

		Ok(resolved)
	}
}

/// Message for a `getaddrinfo` error code.
pub fn gai_strerror(code: i32) -> String {
	let msg = unsafe { libc::gai_strerror(code) };
	if msg.is_null() {
		return format!("resolver error {}", code);
	}
	unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
}

/// Checks host name syntax without resolving anything.
///
/// Labels are 1 to 63 letters, digits, hyphens or underscores and may not
/// start or end with a hyphen. One trailing dot is allowed.
pub fn is_domain_name(name: &str) -> bool {
	let name = name.strip_suffix('.').unwrap_or(name);
	if name.is_empty() || name.len() > MAX_NAME_LEN {
		return false;
	}
	name.split('.').all(is_label)
}

fn is_label(label: &str) -> bool {
	let bytes = label.as_bytes();
	if bytes.is_empty() || bytes.len() > MAX_LABEL_LEN {
		return false;
	}
	if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
		return false;
	}
	bytes.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labels() {
		assert!(is_label("a"));
		assert!(is_label("xn--80ak6aa92e"));
		assert!(is_label("_sip"));
		assert!(!is_label(""));
		assert!(!is_label("-a"));
		assert!(!is_label("a-"));
		assert!(!is_label("a b"));
		assert!(!is_label(&"a".repeat(MAX_LABEL_LEN + 1)));
	}

	#[test]
	fn hints_to_raw() {
		let raw = ResolveHints::new()
			.family(Family::V6)
			.socktype(SockKind::Datagram)
			.numeric_host(true)
			.to_raw();
		assert_eq!(raw.ai_family, libc::AF_INET6);
		assert_eq!(raw.ai_socktype, libc::SOCK_DGRAM);
		assert_eq!(raw.ai_flags, libc::AI_NUMERICHOST);

		let raw = ResolveHints::new().to_raw();
		assert_eq!(raw.ai_family, libc::AF_UNSPEC);
		assert_eq!(raw.ai_flags, 0);
	}
}
