mod map;

pub use self::map::*;
