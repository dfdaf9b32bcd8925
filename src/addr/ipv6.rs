use std::hash::{Hash, Hasher};

use crate::addr::{FromSockAddr, ToSockAddr};

/// Prefix of an IPv4-mapped address, `::ffff:0:0/96`.
const MAPPED_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// Prefix of an IPv4-compatible address, `::/96`.
const COMPAT_PREFIX: [u8; 12] = [0; 12];

/// IPv6 socket address (IP + port + scope).
///
/// Equality and hashing look at the IP and port only.
#[derive(Debug, Clone, Copy)]
pub struct SocketAddrV6 {
	ip: [u8; 16],
	port: u16,
	/// Scope ID for link-local addresses (identifies network interface).
	/// Carried through to `sockaddr_in6` and otherwise left alone.
	scope_id: u32,
}

impl SocketAddrV6 {
	/// Creates a new IPv6 address.
	pub const fn new(ip: [u8; 16], port: u16) -> Self {
		Self { ip, port, scope_id: 0 }
	}

	/// Creates with explicit scope ID.
	pub const fn with_scope(ip: [u8; 16], port: u16, scope_id: u32) -> Self {
		Self { ip, port, scope_id }
	}

	/// Builds `::ffff:a.b.c.d`.
	pub fn v4_mapped(v4: [u8; 4], port: u16) -> Self {
		Self::new(embed(MAPPED_PREFIX, v4), port)
	}

	/// Builds the legacy `::a.b.c.d` form.
	pub fn v4_compat(v4: [u8; 4], port: u16) -> Self {
		Self::new(embed(COMPAT_PREFIX, v4), port)
	}

	/// Returns the IP bytes.
	pub fn ip(&self) -> [u8; 16] {
		self.ip
	}

	/// Borrows the IP bytes.
	pub fn octets(&self) -> &[u8; 16] {
		&self.ip
	}

	/// Returns the port.
	pub fn port(&self) -> u16 {
		self.port
	}

	pub fn set_port(&mut self, port: u16) {
		self.port = port;
	}

	/// Returns the scope ID.
	pub fn scope_id(&self) -> u32 {
		self.scope_id
	}

	/// True for `::`, whatever the port.
	pub fn is_unspecified(&self) -> bool {
		self.ip == [0; 16]
	}

	/// First 80 bits zero, next 16 bits all ones.
	pub fn is_v4_mapped(&self) -> bool {
		self.ip[..12] == MAPPED_PREFIX
	}

	/// First 96 bits zero, low 32 bits not. `::` itself is excluded.
	///
	/// `::1` matches too, unlike glibc's `IN6_IS_ADDR_V4COMPAT`, so the IPv6
	/// loopback converts to `0.0.0.1`.
	pub fn is_v4_compat(&self) -> bool {
		self.ip[..12] == COMPAT_PREFIX && self.ip[12..] != [0; 4]
	}

	/// The IPv4 address carried in the low 32 bits, if this is a mapped or
	/// compatible address.
	pub fn embedded_v4(&self) -> Option<[u8; 4]> {
		if self.is_v4_mapped() || self.is_v4_compat() {
			Some(self.low32())
		} else {
			None
		}
	}

	fn low32(&self) -> [u8; 4] {
		[self.ip[12], self.ip[13], self.ip[14], self.ip[15]]
	}

	/// Converts to the raw sockaddr_in6 for syscalls.
	pub fn to_raw(&self) -> libc::sockaddr_in6 {
		let mut raw: libc::sockaddr_in6 = unsafe { std::mem::zeroed() };
		raw.sin6_family = libc::AF_INET6 as libc::sa_family_t;
		raw.sin6_port = self.port.to_be();
		raw.sin6_addr.s6_addr = self.ip;
		raw.sin6_scope_id = self.scope_id;
		raw
	}

	/// Creates from raw sockaddr_in6.
	///
	/// # Panics
	/// If `sin6_family` is not `AF_INET6`.
	pub fn from_raw(raw: &libc::sockaddr_in6) -> Self {
		assert_eq!(raw.sin6_family as libc::c_int, libc::AF_INET6, "sockaddr_in6 must carry AF_INET6");
		Self {
			ip: raw.sin6_addr.s6_addr,
			port: u16::from_be(raw.sin6_port),
			scope_id: raw.sin6_scope_id,
		}
	}
}

impl PartialEq for SocketAddrV6 {
	fn eq(&self, other: &Self) -> bool {
		self.ip == other.ip && self.port == other.port
	}
}

impl Eq for SocketAddrV6 {}

impl Hash for SocketAddrV6 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.ip.hash(state);
		self.port.hash(state);
	}
}

fn embed(prefix: [u8; 12], v4: [u8; 4]) -> [u8; 16] {
	let mut ip = [0u8; 16];
	ip[..12].copy_from_slice(&prefix);
	ip[12..].copy_from_slice(&v4);
	ip
}

impl ToSockAddr for SocketAddrV6 {
	fn with_raw<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		let raw = self.to_raw();
		let ptr = &raw as *const _ as *const libc::sockaddr;
		let len = std::mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t;
		f(ptr, len)
	}
}

impl FromSockAddr for SocketAddrV6 {
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if addr.is_null() || len < std::mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t {
			return None;
		}
		let raw = unsafe { &*(addr as *const libc::sockaddr_in6) };
		if raw.sin6_family as libc::c_int != libc::AF_INET6 {
			return None;
		}
		Some(Self::from_raw(raw))
	}
}

impl From<std::net::SocketAddrV6> for SocketAddrV6 {
	fn from(addr: std::net::SocketAddrV6) -> Self {
		Self::with_scope(addr.ip().octets(), addr.port(), addr.scope_id())
	}
}

impl From<SocketAddrV6> for std::net::SocketAddrV6 {
	fn from(addr: SocketAddrV6) -> Self {
		std::net::SocketAddrV6::new(addr.ip.into(), addr.port, 0, addr.scope_id)
	}
}
