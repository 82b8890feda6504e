//! Overlay UI: route legend and the bus detail panel

use bevy::prelude::*;

use super::components::{
    route_color, DetailPanel, DetailPanelText, MapViewResource, SelectedBus,
};

/// System to set up the overlay UI
pub fn setup_panel(mut commands: Commands, view: Res<MapViewResource>) {
    // Route legend at top-left of screen
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Routes (1-9 focus, 0 all):"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            for (index, route) in view.0.routes().iter().enumerate().take(9) {
                parent.spawn((
                    Text::new(format!(
                        "{}. {} {}",
                        index + 1,
                        route.route_number,
                        route.route_name
                    )),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(route_color(&route.color)),
                ));
            }
        });

    // Bus detail panel at bottom-left, hidden until a marker is clicked
    commands
        .spawn((
            DetailPanel,
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                DetailPanelText::RouteLabel,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.9, 1.0)),
                DetailPanelText::NextStop,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                DetailPanelText::Eta,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                DetailPanelText::Passengers,
            ));
        });
}

/// System to update the detail panel from the last clicked bus
pub fn update_detail_panel(
    selected: Res<SelectedBus>,
    mut panel_query: Query<&mut Visibility, With<DetailPanel>>,
    mut text_query: Query<(&DetailPanelText, &mut Text)>,
) {
    let Ok(mut visibility) = panel_query.single_mut() else {
        return;
    };

    let Some(bus) = &selected.0 else {
        *visibility = Visibility::Hidden;
        return;
    };
    *visibility = Visibility::Visible;

    for (kind, mut text) in text_query.iter_mut() {
        match kind {
            DetailPanelText::RouteLabel => {
                **text = format!("{} - {}", bus.route_number, bus.route_name);
            }
            DetailPanelText::NextStop => {
                **text = format!("Next: {}", bus.next_stop);
            }
            DetailPanelText::Eta => {
                **text = format!("ETA: {} mins", bus.eta_minutes);
            }
            DetailPanelText::Passengers => {
                **text = format!("Passengers: {}", bus.passengers);
            }
        }
    }
}
