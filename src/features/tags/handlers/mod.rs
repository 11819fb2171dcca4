pub mod tag_handler;

pub use tag_handler::{
    __path_create_tag, __path_delete_tag, __path_list_tags, __path_update_tag, create_tag,
    delete_tag, list_tags, update_tag,
};
