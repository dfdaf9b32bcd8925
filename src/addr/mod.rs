//! IPv4/IPv6 socket endpoints.
//!
//! `IpAddress` is a tagged value holding either a `SocketAddrV4` or a
//! `SocketAddrV6`. The tag is the payload: there is no way to read IPv6
//! bytes out of an IPv4 value or the other way round. Moving between the
//! families goes through `to_v4`, `to_v4_mapped` and `to_v4_compat`.

mod ipv4;
mod ipv6;
mod text;

use std::hash::{Hash, Hasher};

use crate::error::AddrError;

pub use self::ipv4::SocketAddrV4;
pub use self::ipv6::SocketAddrV6;
pub use self::text::TEXT_LEN;

/// The unspecified IPv4 endpoint, `0.0.0.0` port 0.
pub static ANY_V4: IpAddress = IpAddress::V4(SocketAddrV4::new([0; 4], 0));

/// The unspecified IPv6 endpoint, `::` port 0.
pub static ANY_V6: IpAddress = IpAddress::V6(SocketAddrV6::new([0; 16], 0));

const LOOPBACK_V4: [u8; 4] = [127, 0, 0, 1];
const LOOPBACK_V6: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

/// Address family of an `IpAddress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
	V4,
	V6,
}

impl Family {
	/// Returns the libc constant for this address family.
	#[inline]
	pub fn raw(self) -> libc::c_int {
		match self {
			Family::V4 => libc::AF_INET,
			Family::V6 => libc::AF_INET6,
		}
	}

	/// Maps a raw `AF_*` value back to a family.
	pub fn from_raw(family: libc::c_int) -> Result<Self, AddrError> {
		match family {
			libc::AF_INET => Ok(Family::V4),
			libc::AF_INET6 => Ok(Family::V6),
			_ => Err(AddrError::InvalidFamily { family }),
		}
	}

	/// Protocol domain to pass to `socket()`.
	#[inline]
	pub fn domain(self) -> libc::c_int {
		match self {
			Family::V4 => libc::PF_INET,
			Family::V6 => libc::PF_INET6,
		}
	}

	/// Size of the platform sockaddr for this family.
	#[inline]
	pub fn size(self) -> libc::socklen_t {
		let size = match self {
			Family::V4 => std::mem::size_of::<libc::sockaddr_in>(),
			Family::V6 => std::mem::size_of::<libc::sockaddr_in6>(),
		};
		size as libc::socklen_t
	}
}

/// Trait for address types that can be converted to raw sockaddr for syscalls.
pub trait ToSockAddr {
	/// Calls the provided closure with a pointer to the raw sockaddr and its size.
	fn with_raw<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R;
}

/// Trait for address types that can be created from raw sockaddr.
pub trait FromSockAddr: Sized {
	/// Creates address from raw sockaddr storage.
	///
	/// Returns None for a null pointer, a short length or a foreign family.
	///
	/// # Safety
	/// `addr` must be null or point to at least `len` readable bytes.
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self>;
}

/// IPv4 or IPv6 socket endpoint.
///
/// Equality and hashing compare family, address bytes and port. The IPv6
/// scope ID is stored but not compared.
#[derive(Debug, Clone, Copy)]
pub enum IpAddress {
	V4(SocketAddrV4),
	V6(SocketAddrV6),
}

impl IpAddress {
	/// Copies a raw `sockaddr_in`.
	///
	/// # Panics
	/// If `raw.sin_family` is not `AF_INET`.
	pub fn assign_v4(raw: &libc::sockaddr_in) -> Self {
		IpAddress::V4(SocketAddrV4::from_raw(raw))
	}

	/// Copies a raw `sockaddr_in6`.
	///
	/// # Panics
	/// If `raw.sin6_family` is not `AF_INET6`.
	pub fn assign_v6(raw: &libc::sockaddr_in6) -> Self {
		IpAddress::V6(SocketAddrV6::from_raw(raw))
	}

	/// Returns the shared unspecified endpoint for `family`.
	pub fn any(family: Family) -> &'static IpAddress {
		match family {
			Family::V4 => &ANY_V4,
			Family::V6 => &ANY_V6,
		}
	}

	/// `127.0.0.1` or `::1`, port 0.
	pub fn loopback(family: Family) -> IpAddress {
		match family {
			Family::V4 => IpAddress::V4(SocketAddrV4::new(LOOPBACK_V4, 0)),
			Family::V6 => IpAddress::V6(SocketAddrV6::new(LOOPBACK_V6, 0)),
		}
	}

	#[inline]
	pub fn family(&self) -> Family {
		match self {
			IpAddress::V4(_) => Family::V4,
			IpAddress::V6(_) => Family::V6,
		}
	}

	#[inline]
	pub fn is_v4(&self) -> bool {
		matches!(self, IpAddress::V4(_))
	}

	#[inline]
	pub fn is_v6(&self) -> bool {
		matches!(self, IpAddress::V6(_))
	}

	/// `PF_INET` or `PF_INET6`.
	#[inline]
	pub fn domain(&self) -> libc::c_int {
		self.family().domain()
	}

	/// Length of the sockaddr this value is passed to the kernel as.
	#[inline]
	pub fn size(&self) -> libc::socklen_t {
		self.family().size()
	}

	pub fn port(&self) -> u16 {
		match self {
			IpAddress::V4(a) => a.port(),
			IpAddress::V6(a) => a.port(),
		}
	}

	pub fn set_port(&mut self, port: u16) {
		match self {
			IpAddress::V4(a) => a.set_port(port),
			IpAddress::V6(a) => a.set_port(port),
		}
	}

	/// Address bytes in network order, 4 or 16 of them.
	pub fn octets(&self) -> &[u8] {
		match self {
			IpAddress::V4(a) => a.octets(),
			IpAddress::V6(a) => a.octets(),
		}
	}

	/// Same family, same address bytes, same port.
	pub fn equals_exact(&self, other: &IpAddress) -> bool {
		self.equals_address_only(other) && self.port() == other.port()
	}

	/// Same family and address bytes; ports may differ.
	pub fn equals_address_only(&self, other: &IpAddress) -> bool {
		match (self, other) {
			(IpAddress::V4(a), IpAddress::V4(b)) => a.ip() == b.ip(),
			(IpAddress::V6(a), IpAddress::V6(b)) => a.ip() == b.ip(),
			_ => false,
		}
	}

	/// Equal to `ANY_V4` or `ANY_V6`, port included.
	pub fn is_any(&self) -> bool {
		self.equals_exact(IpAddress::any(self.family()))
	}

	/// All-zero address, whatever the port.
	pub fn address_is_any(&self) -> bool {
		match self {
			IpAddress::V4(a) => a.is_unspecified(),
			IpAddress::V6(a) => a.is_unspecified(),
		}
	}

	pub fn is_v4_mapped(&self) -> bool {
		match self {
			IpAddress::V4(_) => false,
			IpAddress::V6(a) => a.is_v4_mapped(),
		}
	}

	pub fn is_v4_compat(&self) -> bool {
		match self {
			IpAddress::V4(_) => false,
			IpAddress::V6(a) => a.is_v4_compat(),
		}
	}

	/// The IPv4 address behind this value, with the same port.
	///
	/// IPv4 values are returned as is. IPv6 values convert only when
	/// mapped or compatible.
	pub fn to_v4(&self) -> Option<IpAddress> {
		self.v4_parts().map(|(ip, port)| IpAddress::V4(SocketAddrV4::new(ip, port)))
	}

	/// The `::ffff:a.b.c.d` form of this value, with the same port.
	pub fn to_v4_mapped(&self) -> Option<IpAddress> {
		self.v4_parts().map(|(ip, port)| IpAddress::V6(SocketAddrV6::v4_mapped(ip, port)))
	}

	/// The legacy `::a.b.c.d` form of this value, with the same port.
	pub fn to_v4_compat(&self) -> Option<IpAddress> {
		self.v4_parts().map(|(ip, port)| IpAddress::V6(SocketAddrV6::v4_compat(ip, port)))
	}

	fn v4_parts(&self) -> Option<([u8; 4], u16)> {
		match self {
			IpAddress::V4(a) => Some((a.ip(), a.port())),
			IpAddress::V6(a) => a.embedded_v4().map(|ip| (ip, a.port())),
		}
	}
}

impl PartialEq for IpAddress {
	fn eq(&self, other: &Self) -> bool {
		self.equals_exact(other)
	}
}

impl Eq for IpAddress {}

impl Hash for IpAddress {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.family().hash(state);
		self.octets().hash(state);
		self.port().hash(state);
	}
}

impl From<SocketAddrV4> for IpAddress {
	fn from(addr: SocketAddrV4) -> Self {
		IpAddress::V4(addr)
	}
}

impl From<SocketAddrV6> for IpAddress {
	fn from(addr: SocketAddrV6) -> Self {
		IpAddress::V6(addr)
	}
}

impl TryFrom<IpAddress> for SocketAddrV4 {
	type Error = AddrError;

	fn try_from(addr: IpAddress) -> Result<Self, Self::Error> {
		match addr.to_v4() {
			Some(IpAddress::V4(v4)) => Ok(v4),
			_ => Err(AddrError::NotRepresentable),
		}
	}
}

impl From<std::net::SocketAddr> for IpAddress {
	fn from(addr: std::net::SocketAddr) -> Self {
		match addr {
			std::net::SocketAddr::V4(a) => IpAddress::V4(a.into()),
			std::net::SocketAddr::V6(a) => IpAddress::V6(a.into()),
		}
	}
}

impl From<IpAddress> for std::net::SocketAddr {
	fn from(addr: IpAddress) -> Self {
		match addr {
			IpAddress::V4(a) => std::net::SocketAddr::V4(a.into()),
			IpAddress::V6(a) => std::net::SocketAddr::V6(a.into()),
		}
	}
}

impl ToSockAddr for IpAddress {
	fn with_raw<F, R>(&self, f: F) -> R
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		match self {
			IpAddress::V4(a) => a.with_raw(f),
			IpAddress::V6(a) => a.with_raw(f),
		}
	}
}

impl FromSockAddr for IpAddress {
	unsafe fn from_sockaddr(addr: *const libc::sockaddr, len: libc::socklen_t) -> Option<Self> {
		if addr.is_null() || len < std::mem::size_of::<libc::sa_family_t>() as libc::socklen_t {
			return None;
		}
		let family = unsafe { (*addr).sa_family } as libc::c_int;
		match Family::from_raw(family).ok()? {
			Family::V4 => unsafe { SocketAddrV4::from_sockaddr(addr, len) }.map(IpAddress::V4),
			Family::V6 => unsafe { SocketAddrV6::from_sockaddr(addr, len) }.map(IpAddress::V6),
		}
	}
}
