mod member;
pub use member::Member;

mod role;
pub use role::Role;
