use bevy::prelude::*;
use connect_four_ui::ConnectFourUiPlugin;

fn main() {
    App::new()
        .add_plugins(ConnectFourUiPlugin)
        .run();
}
