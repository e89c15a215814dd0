pub mod path;
pub mod resolver;

pub use path::{PathError, PathSegment, decode_path, parse_path};
pub use resolver::{PathResolver, ResolveError, ResolvedPath, TrailMatch};
