//! Page Service - Assembles page view-models from content
//!
//! Every page follows the same shape: fetch the primary document by slug and
//! stop with `NotFound` when it is absent, then run the secondary fetches the
//! page needs (concurrently when independent), then derive display fields.
//! A failed secondary fetch degrades to an empty section; only the primary
//! fetch can fail the page.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join;
use tracing::{debug, instrument, warn};

use crate::application::dto::{
    attraction_json_ld, guide_json_ld, AttractionCard, AttractionPageView, GalleryImage,
    GpxDownload, GuideCard, GuideIndexView, GuidePageView, MapLinks, MapPageView,
    MapSnippetView, PageMetadata, PointOfInterest, RegionCard, RegionIndexView, RegionLink,
    RegionPageView, RegionPanel, ShareBlock, TocItem, DURATION_FALLBACK, NO_GUIDES,
    NO_GUIDE_CONTENT, NO_REGIONS, NO_REGION_ATTRACTIONS, REGION_INTRO_FALLBACK,
};
use crate::application::ports::outbound::{FetchError, MapBounds, MapOptions};
use crate::application::services::guide_body::render_body;
use crate::domain::entities::Attraction;
use crate::domain::services::{directions_link, gpx_document, gpx_filename, place_link};
use crate::domain::value_objects::{GeoPoint, ImageRef};
use crate::infrastructure::content::ContentRepository;
use crate::infrastructure::image_url::{Fit, ImageUrlResolver};
use crate::infrastructure::map_widget::{MapWidget, WidgetState};
use crate::infrastructure::static_map::{StaticMap, StaticMapEngine, MAX_URL_LENGTH};

pub const MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v12";

/// Roughly the middle of Iceland
pub const ICELAND_CENTER: GeoPoint = GeoPoint { lat: 64.5, lng: -19.0 };
pub const ICELAND_ZOOM: f64 = 5.2;
pub const ICELAND_BOUNDS: MapBounds = MapBounds {
    south_west: GeoPoint { lat: 63.2, lng: -25.0 },
    north_east: GeoPoint { lat: 66.8, lng: -12.0 },
};

/// Zoom for a single attraction, in snippets and focused map views
pub const ATTRACTION_MAP_ZOOM: f64 = 12.0;

const GALLERY_WIDTH: u32 = 1600;
const THUMBNAIL_SIZE: (u32, u32) = (400, 300);

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("{kind} '{slug}' not found")]
    NotFound { kind: &'static str, slug: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl PageError {
    fn not_found(kind: &'static str, slug: &str) -> Self {
        PageError::NotFound {
            kind,
            slug: slug.to_string(),
        }
    }
}

/// Values pages need beyond content
#[derive(Debug, Clone)]
pub struct PageSettings {
    /// Public origin without trailing slash
    pub site_url: String,
    pub mapbox_token: String,
}

#[async_trait]
pub trait PageService: Send + Sync {
    async fn attraction_page(&self, slug: &str) -> Result<AttractionPageView, PageError>;

    /// Stored attraction document, unprojected
    async fn attraction_document(&self, slug: &str) -> Result<serde_json::Value, PageError>;

    async fn attraction_gpx(&self, slug: &str) -> Result<GpxDownload, PageError>;

    async fn region_page(&self, slug: &str) -> Result<RegionPageView, PageError>;

    async fn regions_index(&self) -> Result<RegionIndexView, PageError>;

    async fn guide_page(&self, slug: &str) -> Result<GuidePageView, PageError>;

    async fn guides_index(&self) -> Result<GuideIndexView, PageError>;

    async fn map_page(&self, focus: Option<&str>) -> Result<MapPageView, PageError>;
}

pub struct PageServiceImpl {
    repository: ContentRepository,
    images: ImageUrlResolver,
    settings: PageSettings,
}

impl PageServiceImpl {
    pub fn new(repository: ContentRepository, images: ImageUrlResolver, settings: PageSettings) -> Self {
        Self {
            repository,
            images,
            settings,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.site_url, path)
    }

    fn image_url(&self, image: Option<&ImageRef>, width: u32) -> Option<String> {
        self.images
            .resolve(image)
            .map(|b| b.width(width).fit(Fit::Max).to_url())
    }

    /// Main image first, then the gallery, each asset once
    fn gallery(&self, attraction: &Attraction) -> Vec<GalleryImage> {
        let mut seen: Vec<&ImageRef> = Vec::new();
        let mut images = Vec::new();

        for image in attraction.main_image.iter().chain(attraction.gallery.iter()) {
            if seen.iter().any(|s| s.same_asset(image)) {
                continue;
            }
            seen.push(image);

            let Some(builder) = self.images.resolve(Some(image)) else {
                continue;
            };
            images.push(GalleryImage {
                url: builder.clone().width(GALLERY_WIDTH).fit(Fit::Max).to_url(),
                thumbnail_url: builder
                    .width(THUMBNAIL_SIZE.0)
                    .height(THUMBNAIL_SIZE.1)
                    .fit(Fit::Crop)
                    .to_url(),
                alt: image.alt.clone().unwrap_or_else(|| attraction.name.clone()),
                caption: image.caption.clone(),
            });
        }
        images
    }

    fn map_links(attraction: &Attraction) -> MapLinks {
        let coords = attraction.coords;
        // Directions lead to the car park when it is somewhere else
        let target = attraction
            .parking_coords()
            .filter(|p| p.is_distinct_from(&coords))
            .unwrap_or(coords);
        MapLinks {
            place: place_link(coords.lat, coords.lng, Some(attraction.name.as_str())),
            directions: directions_link(target.lat, target.lng),
        }
    }

    fn parking_links(attraction: &Attraction) -> Option<MapLinks> {
        let parking = attraction.parking_coords()?;
        let label = format!("{} parking", attraction.name);
        Some(MapLinks {
            place: place_link(parking.lat, parking.lng, Some(label.as_str())),
            directions: directions_link(parking.lat, parking.lng),
        })
    }

    fn toc(attraction: &Attraction, has_gallery: bool, has_practical: bool) -> Vec<TocItem> {
        let mut items = vec![TocItem::new("overview", "Overview")];
        if has_gallery {
            items.push(TocItem::new("gallery", "Gallery"));
        }
        if has_practical {
            items.push(TocItem::new("practical", "Practical Information"));
        }
        if attraction.photo_tips.is_some() {
            items.push(TocItem::new("photo-tips", "Photo Tips"));
        }
        if !attraction.faqs.is_empty() {
            items.push(TocItem::new("faq", "FAQ"));
        }
        items.push(TocItem::new("map", "Map"));
        items.push(TocItem::new("share", "Share & Download"));
        items
    }

    /// Static preview of the map page, if the map can be drawn
    fn map_preview(&self, points: Arc<[PointOfInterest]>, center: GeoPoint, zoom: f64) -> Option<String> {
        let options = MapOptions {
            access_token: self.settings.mapbox_token.clone(),
            style: MAP_STYLE.to_string(),
            center,
            zoom,
            bounds: Some(ICELAND_BOUNDS),
        };
        let mut widget = MapWidget::new(StaticMapEngine::default(), "map-preview", options);
        widget.set_points(points);
        widget.on_load();

        let url = match widget.state() {
            WidgetState::Ready { .. } => widget.instance().and_then(StaticMap::url),
            _ => None,
        };
        let preview = match url {
            Some(url) if url.len() > MAX_URL_LENGTH => {
                widget.on_error(format!("preview URL is {} characters long", url.len()));
                None
            }
            url => url,
        };
        if preview.is_none() {
            debug!(state = ?widget.state(), "No map preview");
        }

        widget.unmount();
        preview
    }
}

/// Secondary fetch result, or an empty list when it failed
fn or_empty<T>(what: &'static str, result: Result<Vec<T>, FetchError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(section = what, error = %e, "Secondary fetch failed; section left empty");
        Vec::new()
    })
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

#[async_trait]
impl PageService for PageServiceImpl {
    #[instrument(skip(self))]
    async fn attraction_page(&self, slug: &str) -> Result<AttractionPageView, PageError> {
        let attractions = self.repository.attractions();
        let attraction = attractions
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| PageError::not_found("attraction", slug))?;

        let nearby = match &attraction.region {
            Some(region) => or_empty(
                "nearby attractions",
                attractions.list_by_region(region.slug.as_str()).await,
            )
            .iter()
            .filter(|a| a.slug != attraction.slug)
            .map(AttractionCard::from)
            .collect(),
            None => Vec::new(),
        };

        let page_path = format!("/attractions/{}", attraction.slug);
        let page_url = self.url(&page_path);
        let gallery = self.gallery(&attraction);
        let practical = attraction.practical.clone().filter(|p| !p.is_empty());
        let map_links = Self::map_links(&attraction);
        let description = non_empty(Some(attraction.description.as_str()));

        let region = attraction.region.as_ref().map(|r| {
            let intro = non_empty(r.intro.as_deref());
            RegionPanel {
                slug: r.slug.to_string(),
                name: r.name.clone(),
                href: format!("/regions/{}", r.slug),
                has_intro: intro.is_some(),
                intro: intro.unwrap_or_else(|| REGION_INTRO_FALLBACK.to_string()),
            }
        });

        let main_image_url = self.image_url(attraction.main_image.as_ref(), GALLERY_WIDTH);
        let json_ld = attraction_json_ld(&attraction, &page_url, main_image_url.as_deref());
        let toc = Self::toc(&attraction, !gallery.is_empty(), practical.is_some());

        Ok(AttractionPageView {
            metadata: PageMetadata::titled(
                &attraction.name,
                description.as_deref().unwrap_or(&attraction.name),
            )
            .with_canonical(page_url.clone()),
            slug: attraction.slug.to_string(),
            name: attraction.name.clone(),
            description: attraction.description.clone(),
            coords: attraction.coords,
            category: attraction.category.as_ref().map(|c| c.as_str().to_string()),
            category_label: attraction.category.as_ref().map(|c| c.label()),
            duration_label: attraction
                .visit_duration
                .map(|d| d.label())
                .unwrap_or_else(|| DURATION_FALLBACK.to_string()),
            average_visit_minutes: attraction.visit_duration.map(|d| d.average_minutes()),
            facilities: attraction.facilities.iter().map(|f| f.label()).collect(),
            region,
            practical,
            parking_links: Self::parking_links(&attraction),
            photo_tips: non_empty(attraction.photo_tips.as_deref()),
            faqs: attraction.faqs.clone(),
            gallery,
            share: ShareBlock {
                page_url,
                place_link: map_links.place.clone(),
                gpx_href: format!("/api/attractions/{}/gpx", attraction.slug),
                gpx_filename: gpx_filename(Some(attraction.slug.as_str()), &attraction.name),
            },
            map_links,
            map_snippet: MapSnippetView {
                center: attraction.coords,
                zoom: attraction
                    .map_snippet
                    .and_then(|s| s.zoom)
                    .unwrap_or(ATTRACTION_MAP_ZOOM),
                show_scale: attraction
                    .map_snippet
                    .and_then(|s| s.show_scale)
                    .unwrap_or(false),
                full_map_href: format!("/map?focus={}", attraction.slug),
            },
            toc,
            nearby,
            json_ld,
        })
    }

    #[instrument(skip(self))]
    async fn attraction_document(&self, slug: &str) -> Result<serde_json::Value, PageError> {
        self.repository
            .attractions()
            .get_document(slug)
            .await?
            .ok_or_else(|| PageError::not_found("attraction", slug))
    }

    #[instrument(skip(self))]
    async fn attraction_gpx(&self, slug: &str) -> Result<GpxDownload, PageError> {
        let attraction = self
            .repository
            .attractions()
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| PageError::not_found("attraction", slug))?;

        Ok(GpxDownload {
            filename: gpx_filename(Some(attraction.slug.as_str()), &attraction.name),
            body: gpx_document(&attraction.name, attraction.coords.lat, attraction.coords.lng),
        })
    }

    #[instrument(skip(self))]
    async fn region_page(&self, slug: &str) -> Result<RegionPageView, PageError> {
        let region = self
            .repository
            .regions()
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| PageError::not_found("region", slug))?;

        let attractions = self.repository.attractions();
        let guides = self.repository.guides();
        let (attractions, guides) = join(
            attractions.list_by_region(region.slug.as_str()),
            guides.list_by_region(region.slug.as_str()),
        )
        .await;

        let attractions: Vec<AttractionCard> = or_empty("region attractions", attractions)
            .iter()
            .map(AttractionCard::from)
            .collect();
        let guides = or_empty("region guides", guides)
            .iter()
            .map(GuideCard::from)
            .collect();

        Ok(RegionPageView {
            metadata: PageMetadata::titled(&region.name, &region.intro)
                .with_canonical(self.url(&format!("/regions/{}", region.slug))),
            slug: region.slug.to_string(),
            name: region.name,
            intro: region.intro,
            empty_message: attractions
                .is_empty()
                .then(|| NO_REGION_ATTRACTIONS.to_string()),
            attractions,
            guides,
        })
    }

    #[instrument(skip(self))]
    async fn regions_index(&self) -> Result<RegionIndexView, PageError> {
        let regions = self.repository.regions().list().await?;

        Ok(RegionIndexView {
            metadata: PageMetadata::new(
                "Explore Regions - TravelKnowledge",
                "Discover attractions and travel guides by region",
            )
            .with_canonical(self.url("/regions")),
            empty_message: regions.is_empty().then(|| NO_REGIONS.to_string()),
            regions: regions.iter().map(RegionCard::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn guide_page(&self, slug: &str) -> Result<GuidePageView, PageError> {
        let guide = self
            .repository
            .guides()
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| PageError::not_found("guide", slug))?;

        let suggested_attractions = match &guide.region {
            Some(region) => or_empty(
                "suggested attractions",
                self.repository
                    .attractions()
                    .list_by_region(region.slug.as_str())
                    .await,
            )
            .iter()
            .map(AttractionCard::from)
            .collect(),
            None => Vec::new(),
        };

        let page_url = self.url(&format!("/guides/{}", guide.slug));
        let rendered = render_body(&guide.body, &self.images, &self.settings.site_url);

        Ok(GuidePageView {
            metadata: PageMetadata::titled(&guide.title, &format!("Travel guide for {}", guide.title))
                .with_canonical(page_url.clone()),
            slug: guide.slug.to_string(),
            title: guide.title.clone(),
            region: guide.region.as_ref().map(|r| RegionLink {
                slug: r.slug.to_string(),
                name: r.name.clone(),
                href: format!("/regions/{}", r.slug),
            }),
            empty_message: rendered
                .nodes
                .is_empty()
                .then(|| NO_GUIDE_CONTENT.to_string()),
            body: rendered.nodes,
            outline: rendered.outline,
            suggested_attractions,
            json_ld: guide_json_ld(&guide, &page_url),
        })
    }

    #[instrument(skip(self))]
    async fn guides_index(&self) -> Result<GuideIndexView, PageError> {
        let guides = self.repository.guides().list().await?;

        Ok(GuideIndexView {
            metadata: PageMetadata::new(
                "Travel Guides - TravelKnowledge",
                "Explore our collection of travel guides for different regions",
            )
            .with_canonical(self.url("/guides")),
            empty_message: guides.is_empty().then(|| NO_GUIDES.to_string()),
            guides: guides.iter().map(GuideCard::from).collect(),
        })
    }

    #[instrument(skip(self))]
    async fn map_page(&self, focus: Option<&str>) -> Result<MapPageView, PageError> {
        let attractions = self.repository.attractions().list_for_map().await?;
        let points: Arc<[PointOfInterest]> = attractions.iter().map(PointOfInterest::from).collect();

        let focused = focus
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .and_then(|f| {
                let found = attractions.iter().find(|a| a.slug.as_str() == f);
                if found.is_none() {
                    debug!(focus = f, "Focus slug not on the map");
                }
                found
            });

        let (center, zoom) = match focused {
            Some(a) => (a.coords, ATTRACTION_MAP_ZOOM),
            None => (ICELAND_CENTER, ICELAND_ZOOM),
        };
        let preview_url = self.map_preview(points.clone(), center, zoom);

        Ok(MapPageView {
            metadata: PageMetadata::new(
                "Explore Attractions - TravelKnowledge",
                "Find attractions across Iceland on an interactive map",
            )
            .with_canonical(self.url("/map")),
            points: points.to_vec(),
            center,
            zoom,
            min_zoom: ICELAND_ZOOM,
            bounds: ICELAND_BOUNDS,
            style: MAP_STYLE.to_string(),
            focus: focused.map(|a| a.slug.to_string()),
            preview_url,
        })
    }
}
