pub mod net;
pub mod strarg;
mod addr;
mod error;

pub use self::error::{AddrError, ArgError, ResolveError, errno};
pub use self::addr::{Family, IpAddress, SocketAddrV4, SocketAddrV6,
					 ToSockAddr, FromSockAddr,
					 ANY_V4, ANY_V6, TEXT_LEN};
pub use self::net::{Resolver, SystemResolver, ResolveHints, SockKind, is_domain_name};
pub use self::strarg::tokenize;
