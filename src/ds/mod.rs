pub mod dynamic_array;
pub mod intrusive_list;
pub mod slot_arena;

pub use dynamic_array::{DEFAULT_ARRAY_CAPACITY, DynamicArray};
pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
