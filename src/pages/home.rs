use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::dataset;

/// Graph of the bundled query result.
#[component]
pub fn Home() -> impl IntoView {
	let graph = move || {
		dataset::load_bundled().map(|data| {
			let graph_data = Signal::derive(move || data.clone());
			view! {
				<div class="fullscreen-graph">
					<ForceGraphCanvas data=graph_data fullscreen=true />
					<div class="graph-overlay">
						<h1>"Query Graph"</h1>
						<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan. Hover a node to see its label."</p>
					</div>
				</div>
			}
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{graph}
		</ErrorBoundary>
	}
}
