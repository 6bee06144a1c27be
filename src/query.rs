// Pure string helpers for URL queries, routes and DOM attribute values.

/// Pages of the single-page site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Events,
    Photos,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Events, Route::Photos];

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Events => "events",
            Route::Photos => "photos",
        }
    }

    pub fn from_name(name: &str) -> Option<Route> {
        let name = name.trim().trim_start_matches('#').trim_start_matches('/');
        Route::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    /// Route for a location hash like `#/events`; unknown or empty is Home.
    pub fn from_hash(hash: &str) -> Route {
        Route::from_name(hash).unwrap_or(Route::Home)
    }

    pub fn hash(self) -> String {
        format!("#/{}", self.name())
    }
}

/// True for `?invite=walima` or a bare `?walima` flag, case-insensitive.
pub fn is_walima_only(search: &str, param: &str, value: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .any(|pair| {
            let (key, val) = match pair.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (pair, None),
            };
            match val {
                Some(v) => key.eq_ignore_ascii_case(param) && v.eq_ignore_ascii_case(value),
                None => key.eq_ignore_ascii_case(value),
            }
        })
}

/// `data-index` attribute value; missing or malformed is `None`.
pub fn parse_data_index(attr: Option<&str>) -> Option<usize> {
    attr?.trim().parse().ok()
}

/// Base64 payload of a `data:<mime>;base64,<payload>` URL.
pub fn data_url_payload(data_url: &str) -> Option<&str> {
    let (head, payload) = data_url.split_once(',')?;
    if !head.starts_with("data:") || !head.ends_with(";base64") || payload.is_empty() {
        return None;
    }
    Some(payload)
}

/// CSS declaration for one generated particle element.
pub fn particle_style(x: f32, y: f32, size: f32, color: &str) -> String {
    format!(
        "left:{:.1}px;top:{:.1}px;font-size:{:.1}px;color:{};",
        x, y, size, color
    )
}

/// CSS declaration for one looping ambient particle.
pub fn ambient_style(left_percent: f32, duration_s: f32, delay_s: f32, size_px: f32) -> String {
    format!(
        "left:{:.2}%;animation-duration:{:.2}s;animation-delay:{:.2}s;font-size:{:.1}px;",
        left_percent, duration_s, delay_s, size_px
    )
}

/// Transform applied to the timeline fill for a given progress.
pub fn fill_transform(progress: f64) -> String {
    format!("scaleY({:.4})", progress.clamp(0.0, 1.0))
}
