pub mod xdg_root;

pub use xdg_root::{config_home, data_home, default_data_dir, global_config_path};
