//! Fixed feed lists for news outlets whose catalogue is known up front.
//!
//! Any URL on one of these hosts yields the whole list; the path is ignored.

use super::{feed, CatalogueFeed, Extractor, HostMatch, Rule};

const fn catalogue(
    name: &'static str,
    hosts: &'static [&'static str],
    feeds: &'static [CatalogueFeed],
) -> Rule {
    Rule {
        name,
        hosts: HostMatch::Exact(hosts),
        extractor: Extractor::Catalogue(feeds),
    }
}

pub(super) const NYTIMES: Rule = catalogue("NYTimes", &["nytimes.com", "www.nytimes.com"], NYTIMES_FEEDS);
pub(super) const CNN: Rule = catalogue("CNN", &["cnn.com", "www.cnn.com"], CNN_FEEDS);
pub(super) const FOX_NEWS: Rule = catalogue("Fox News", &["foxnews.com", "www.foxnews.com"], FOX_NEWS_FEEDS);
pub(super) const BBC: Rule = catalogue(
    "BBC",
    &["bbc.co.uk", "www.bbc.co.uk", "bbc.com", "www.bbc.com"],
    BBC_FEEDS,
);
pub(super) const NY_POST: Rule = catalogue("NY Post", &["nypost.com", "www.nypost.com"], NY_POST_FEEDS);
pub(super) const CNBC: Rule = catalogue("CNBC", &["cnbc.com", "www.cnbc.com"], CNBC_FEEDS);
pub(super) const CBS_NEWS: Rule = catalogue("CBS News", &["cbsnews.com", "www.cbsnews.com"], CBS_NEWS_FEEDS);
pub(super) const WASHINGTON_POST: Rule = catalogue(
    "Washington Post",
    &["washingtonpost.com", "www.washingtonpost.com"],
    WASHINGTON_POST_FEEDS,
);
pub(super) const WSJ: Rule = catalogue("WSJ", &["wsj.com", "www.wsj.com"], WSJ_FEEDS);

const NYTIMES_FEEDS: &[CatalogueFeed] = &[
    feed("https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml", "Home Page"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/World.xml", "World"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Africa.xml", "Africa"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Americas.xml", "Americas"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/AsiaPacific.xml", "Asia Pacific"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Europe.xml", "Europe"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/MiddleEast.xml", "Middle East"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/US.xml", "U.S."),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Education.xml", "Education"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Politics.xml", "Politics"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Upshot.xml", "The Upshot"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/NYRegion.xml", "N.Y./Region"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Business.xml", "Business"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/EnergyEnvironment.xml", "Energy & Environment"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/SmallBusiness.xml", "Small Business"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Economy.xml", "Economy"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Dealbook.xml", "DealBook"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/MediaandAdvertising.xml", "Media & Advertising"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/YourMoney.xml", "Your Money"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Technology.xml", "Technology"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/PersonalTech.xml", "Personal Tech"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Sports.xml", "Sports"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Baseball.xml", "Baseball"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/CollegeBasketball.xml", "College Basketball"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/CollegeFootball.xml", "College Football"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Golf.xml", "Golf"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Hockey.xml", "Hockey"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/ProBasketball.xml", "Pro-Basketball"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/ProFootball.xml", "Pro-Football"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Soccer.xml", "Soccer"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Tennis.xml", "Tennis"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Science.xml", "Science"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Climate.xml", "Climate"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Space.xml", "Space & Cosmos"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Health.xml", "Health"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Well.xml", "Well Blog"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Weather.xml", "Weather"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Arts.xml", "Arts"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/ArtandDesign.xml", "Art & Design"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Books/Review.xml", "Book Review"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Dance.xml", "Dance"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Movies.xml", "Movies"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Music.xml", "Music"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Television.xml", "Television"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Theater.xml", "Theater"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/FashionandStyle.xml", "Fashion & Style"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/DiningandWine.xml", "Dining & Wine"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Weddings.xml", "Love"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/tmagazine.xml", "T Magazine"),
    feed("https://www.nytimes.com/services/xml/rss/nyt/Travel.xml", "Travel"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Jobs.xml", "Jobs"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/RealEstate.xml", "Real Estate"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Automobiles.xml", "Autos"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Lens.xml", "Lens Blog"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/Obituaries.xml", "Obituaries"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/recent.xml", "Times Wire"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/MostEmailed.xml", "Most E-Mailed"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/MostShared.xml", "Most Shared"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/MostViewed.xml", "Most Viewed"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/charles-m-blow/rss.xml", "Charles M. Blow"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/jamelle-bouie/rss.xml", "Jamelle Bouie"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/david-brooks/rss.xml", "David Brooks"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/frank-bruni/rss.xml", "Frank Bruni"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/gail-collins/rss.xml", "Gail Collins"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/ross-douthat/rss.xml", "Ross Douthat"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/maureen-dowd/rss.xml", "Maureen Dowd"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/thomas-l-friedman/rss.xml", "Thomas L. Friedman"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/michelle-goldberg/rss.xml", "Michelle Goldberg"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/ezra-klein/rss.xml", "Ezra Klein"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/nicholas-kristof/rss.xml", "Nicholas D. Kristof"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/paul-krugman/rss.xml", "Paul Krugman"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/farhad-manjoo/rss.xml", "Farhad Manjoo"),
    feed("https://www.nytimes.com/svc/collections/v1/publish/www.nytimes.com/column/bret-stephens/rss.xml", "Bret Stephens"),
    feed("https://rss.nytimes.com/services/xml/rss/nyt/sunday-review.xml", "Sunday Opinion"),
];

const CNN_FEEDS: &[CatalogueFeed] = &[
    feed("http://rss.cnn.com/rss/cnn_topstories.rss", "Top Stories"),
    feed("http://rss.cnn.com/rss/cnn_world.rss", "World"),
    feed("http://rss.cnn.com/rss/cnn_us.rss", "U.S."),
    feed("http://rss.cnn.com/rss/money_latest.rss", "Business"),
    feed("http://rss.cnn.com/rss/cnn_allpolitics.rss", "Politics"),
    feed("http://rss.cnn.com/rss/cnn_tech.rss", "Technology"),
    feed("http://rss.cnn.com/rss/cnn_health.rss", "Health"),
    feed("http://rss.cnn.com/rss/cnn_showbiz.rss", "Entertainment"),
    feed("http://rss.cnn.com/rss/cnn_travel.rss", "Travel"),
    feed("http://rss.cnn.com/rss/cnn_freevideo.rss", "Video"),
    feed("http://rss.cnn.com/services/podcasting/cnn10/rss.xml", "CNN 10"),
    feed("http://rss.cnn.com/rss/cnn_latest.rss", "Most Recent"),
    feed("http://rss.cnn.com/cnn-underscored.rss", "CNN Underscored"),
];

const FOX_NEWS_FEEDS: &[CatalogueFeed] = &[
    feed("https://moxie.foxnews.com/google-publisher/latest.xml", "Latest Headlines"),
    feed("https://moxie.foxnews.com/google-publisher/world.xml", "World"),
    feed("https://moxie.foxnews.com/google-publisher/us.xml", "U.S."),
    feed("https://moxie.foxnews.com/google-publisher/politics.xml", "Politics"),
    feed("https://moxie.foxnews.com/google-publisher/science.xml", "Science"),
    feed("https://moxie.foxnews.com/google-publisher/health.xml", "Health"),
    feed("https://moxie.foxnews.com/google-publisher/sports.xml", "Sports"),
    feed("https://moxie.foxnews.com/google-publisher/travel.xml", "Travel"),
    feed("https://moxie.foxnews.com/google-publisher/tech.xml", "Tech"),
    feed("https://moxie.foxnews.com/google-publisher/opinion.xml", "Opinion"),
    feed("https://moxie.foxnews.com/google-publisher/videos.xml", "Video"),
];

const BBC_FEEDS: &[CatalogueFeed] = &[
    feed("http://feeds.bbci.co.uk/news/rss.xml", "Top Stories"),
    feed("http://feeds.bbci.co.uk/news/world/rss.xml", "World"),
    feed("http://feeds.bbci.co.uk/news/uk/rss.xml", "UK"),
    feed("http://feeds.bbci.co.uk/news/business/rss.xml", "Business"),
    feed("http://feeds.bbci.co.uk/news/politics/rss.xml", "Politics"),
    feed("http://feeds.bbci.co.uk/news/health/rss.xml", "Health"),
    feed("http://feeds.bbci.co.uk/news/education/rss.xml", "Education & Family"),
    feed("http://feeds.bbci.co.uk/news/science_and_environment/rss.xml", "Science & Environment"),
    feed("http://feeds.bbci.co.uk/news/technology/rss.xml", "Technology"),
    feed("http://feeds.bbci.co.uk/news/entertainment_and_arts/rss.xml", "Entertainment & Arts"),
    feed("http://feeds.bbci.co.uk/news/world/africa/rss.xml", "Africa"),
    feed("http://feeds.bbci.co.uk/news/world/asia/rss.xml", "Asia"),
    feed("http://feeds.bbci.co.uk/news/world/europe/rss.xml", "Europe"),
    feed("http://feeds.bbci.co.uk/news/world/latin_america/rss.xml", "Latin America"),
    feed("http://feeds.bbci.co.uk/news/world/middle_east/rss.xml", "Middle East"),
    feed("http://feeds.bbci.co.uk/news/world/us_and_canada/rss.xml", "US & Canada"),
    feed("http://feeds.bbci.co.uk/news/england/rss.xml", "England"),
    feed("http://feeds.bbci.co.uk/news/northern_ireland/rss.xml", "Northern Ireland"),
    feed("http://feeds.bbci.co.uk/news/scotland/rss.xml", "Scotland"),
    feed("http://feeds.bbci.co.uk/news/wales/rss.xml", "Wales"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/news_front_page/rss.xml?edition=uk", "Top Stories (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/world/rss.xml", "World (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/uk/rss.xml", "UK (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/business/rss.xml", "Business (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/politics/rss.xml", "Politics (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/health/rss.xml", "Health (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/science_and_environment/rss.xml", "Science & Environment (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/technology/rss.xml", "Technology (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/video_and_audio/entertainment_and_arts/rss.xml", "Entertainment & Arts (Video & Audio)"),
    feed("http://feeds.bbci.co.uk/news/system/latest_published_content/rss.xml", "Latest Published Stories"),
    feed("http://feeds.bbci.co.uk/news/magazine/rss.xml", "Magazine"),
    feed("http://feeds.bbci.co.uk/news/also_in_the_news/rss.xml", "Also in the News"),
    feed("http://newsrss.bbc.co.uk/rss/newsonline_uk_edition/in_pictures/rss.xml", "In Pictures"),
    feed("http://feeds.bbci.co.uk/news/special_reports/rss.xml", "Special Reports"),
    feed("http://feeds.bbci.co.uk/news/have_your_say/rss.xml", "Have Your Say"),
    feed("https://www.bbc.co.uk/blogs/theeditors/rss.xml", "Editors Blog"),
    feed("http://feeds.bbci.co.uk/news/rss.xml?edition=uk", "Top Stories (UK Edition)"),
    feed("http://feeds.bbci.co.uk/news/rss.xml?edition=us", "Top Stories (US & Canada Edition)"),
    feed("http://feeds.bbci.co.uk/news/rss.xml?edition=int", "Top Stories (International Edition)"),
];

const NY_POST_FEEDS: &[CatalogueFeed] = &[
    feed("https://nypost.com/feed/", "NYPost.com – All Stories"),
    feed("https://pagesix.com/feed/", "PageSix.com – All Stories"),
    feed("https://nypost.com/us-news/feed/", "US News"),
    feed("https://nypost.com/metro/feed/", "Metro"),
    feed("https://nypost.com/politics/feed/", "Politics"),
    feed("https://nypost.com/world-news/feed/", "World News"),
    feed("https://nypost.com/sports/feed/", "Sports"),
    feed("https://nypost.com/business/feed/", "Business"),
    feed("https://nypost.com/opinion/feed/", "Opinion"),
    feed("https://nypost.com/entertainment/feed/", "Entertainment"),
    feed("https://nypost.com/fashion-and-beauty/feed/", "Fashion and Beauty"),
    feed("https://nypost.com/lifestyle/feed/", "Lifestyle"),
    feed("https://nypost.com/tech/feed/", "Tech"),
    feed("https://nypost.com/media/feed/", "Media"),
    feed("https://nypost.com/real-estate/feed/", "Real Estate"),
];

const CNBC_FEEDS: &[CatalogueFeed] = &[
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100003114", "Top News"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100727362", "World News"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15837362", "US News"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=19832390", "Asia News"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=19794221", "Europe News"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10001147", "Business"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15839135", "Earnings"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100370673", "Commentary"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=20910258", "Economy"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000664", "Finance"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=19854910", "Technology"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000113", "Politics"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000108", "Health Care"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000115", "Real Estate"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10001054", "Wealth"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000101", "Autos"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=19836768", "Energy"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000110", "Media"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000116", "Retail"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=10000739", "Travel"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=44877279", "Small Business"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=105806347", "CNBC Select"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=103395579", "CNBC Make It"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15839069", "Investing"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100646281", "Financial Advisors"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=21324812", "Personal Finance"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=23103686", "Charting Asia"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=17646093", "Funny Business"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=20409666", "Market Insider"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=38818154", "NetNet"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=20398120", "Trader Talk"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=19206666", "Buffett Watch"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15839263", "Top Video"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100616801", "Digital Workshop"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100004038", "Latest Video"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100004032", "CEO Interviews"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100004033", "Analyst Interviews"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=101014894", "Must Watch"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838368", "Squawk Box"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838381", "Squawk on the Street"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838342", "Power Lunch"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838408", "Street Signs"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=28282083", "Options Action"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838421", "Closing Bell"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838499", "Fast Money"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838459", "Mad Money"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838446", "Kudlow Report"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=48227449", "Futures Now"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838523", "Suze Orman"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=17501773", "Capital Connection"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838652", "Squawk Box Europe"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838355", "Worldwide Exchange"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=15838831", "Squawk Box Asia"),
    feed("https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=37447855", "The Call"),
];

const CBS_NEWS_FEEDS: &[CatalogueFeed] = &[
    feed("https://www.cbsnews.com/latest/rss/main", "Top Stories"),
    feed("https://www.cbsnews.com/latest/rss/us", "U.S."),
    feed("https://www.cbsnews.com/latest/rss/politics", "Politics"),
    feed("https://www.cbsnews.com/latest/rss/world", "World"),
    feed("https://www.cbsnews.com/latest/rss/health", "Health"),
    feed("https://www.cbsnews.com/latest/rss/moneywatch", "MoneyWatch"),
    feed("https://www.cbsnews.com/latest/rss/science", "Science"),
    feed("https://www.cbsnews.com/latest/rss/technology", "Technology"),
    feed("https://www.cbsnews.com/latest/rss/entertainment", "Entertainment"),
    feed("https://www.cbsnews.com/latest/rss/space", "Space"),
    feed("https://www.cbsnews.com/latest/rss/evening-news/cbs-news-investigates", "CBS News Investigations"),
    feed("https://www.cbsnews.com/latest/rss/cbs-mornings-clips", "CBS Mornings"),
    feed("https://www.cbsnews.com/latest/rss/evening-news", "CBS Evening News"),
    feed("https://www.cbsnews.com/latest/rss/evening-news-on-the-road", "On the Road"),
    feed("https://www.cbsnews.com/latest/rss/60-minutes", "60 Minutes"),
    feed("https://www.cbsnews.com/latest/rss/sunday-morning", "Sunday Morning"),
    feed("https://www.cbsnews.com/latest/rss/face-the-nation", "Face the Nation"),
    feed("https://www.cbsnews.com/latest/rss/48-hours", "48 Hours"),
    feed("https://www.cbsnews.com/latest/rss/cbs-mornings-saturday-clips", "CBS Saturday Morning"),
    feed("https://www.cbsnews.com/latest/rss/cbs-reports-custom", "CBS Reports"),
    feed("https://www.cbsnews.com/latest/rss/cbs-news-mornings-clips", "CBS Morning News"),
    feed("https://www.cbsnews.com/latest/rss/daily-report-clips", "The Daily Report"),
    feed("https://www.cbsnews.com/latest/rss/the-takeout-full-episodes", "The Takeout"),
    feed("https://www.cbsnews.com/latest/rss/uplift-full-episodes", "The Uplift"),
    feed("https://www.cbsnews.com/latest/rss/eye-on-america-full-episodes", "Eye on America"),
    feed("https://www.cbsnews.com/latest/rss/the-dish-full-episodes", "The Dish"),
];

const WASHINGTON_POST_FEEDS: &[CatalogueFeed] = &[
    feed("https://www.washingtonpost.com/arcio/rss/category/politics/", "Politics"),
    feed("https://www.washingtonpost.com/arcio/rss/category/opinions/", "Opinions"),
    feed("https://feeds.washingtonpost.com/rss/local", "Local"),
    feed("https://www.washingtonpost.com/arcio/rss/category/sports/", "Sports"),
    feed("https://feeds.washingtonpost.com/rss/business/technology", "Technology"),
    feed("http://feeds.washingtonpost.com/rss/national", "National"),
    feed("https://feeds.washingtonpost.com/rss/world", "World"),
    feed("http://feeds.washingtonpost.com/rss/business", "Business"),
    feed("https://feeds.washingtonpost.com/rss/lifestyle", "Lifestyle"),
    feed("http://feeds.washingtonpost.com/rss/entertainment", "Entertainment"),
    feed("http://feeds.washingtonpost.com/rss/rss_the-fix", "The Fix"),
    feed("https://www.washingtonpost.com/arcio/rss/author/George%20F%20-Will/", "George F. Will"),
    feed("http://feeds.washingtonpost.com/rss/rss_capital-weather-gang", "Capital Weather Gang"),
    feed("http://feeds.washingtonpost.com/rss/national/inspired-life", "The Optimist"),
    feed("https://www.washingtonpost.com/arcio/rss/category/history/", "Retropolis"),
    feed("http://feeds.washingtonpost.com/rss/rss_recruiting-insider", "High School Sports"),
    feed("http://feeds.washingtonpost.com/rss/rss_dc-sports-bog", "DC Sports Bog"),
    feed("http://feeds.washingtonpost.com/rss/rss_terrapins-insider", "Maryland Terrapins"),
    feed("http://feeds.washingtonpost.com/rss/rss_soccer-insider", "Soccer"),
    feed("http://feeds.washingtonpost.com/rss/rss_football-insider", "Washington Commanders"),
    feed("http://feeds.washingtonpost.com/rss/rss_capitals-insider", "Washington Capitals"),
    feed("http://feeds.washingtonpost.com/rss/rss_nationals-journal", "Washington Nationals"),
    feed("http://feeds.washingtonpost.com/rss/rss_wizards-insider", "Washington Wizards"),
    feed("http://feeds.washingtonpost.com/rss/rss_going-out-gurus", "Going Out Guide"),
];

const WSJ_FEEDS: &[CatalogueFeed] = &[
    feed("https://feeds.content.dowjones.io/public/rss/RSSOpinion", "Opinion"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSWorldNews", "World News"),
    feed("https://feeds.content.dowjones.io/public/rss/WSJcomUSBusiness", "U.S. Business"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSMarketsMain", "Markets News"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSWSJD", "Technology: What's News"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSLifestyle", "Lifestyle"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSUSnews", "U.S."),
    feed("https://feeds.content.dowjones.io/public/rss/socialpoliticsfeed", "Politics"),
    feed("https://feeds.content.dowjones.io/public/rss/socialeconomyfeed", "Economy"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSArtsCulture", "Arts"),
    feed("https://feeds.content.dowjones.io/public/rss/latestnewsrealestate", "Real Estate"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSPersonalFinance", "Personal Finance"),
    feed("https://feeds.content.dowjones.io/public/rss/socialhealth", "Health"),
    feed("https://feeds.content.dowjones.io/public/rss/RSSStyle", "Style"),
    feed("https://feeds.content.dowjones.io/public/rss/rsssportsfeed", "Sports"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: &[Rule] = &[NYTIMES, CNN, FOX_NEWS, BBC, NY_POST, CNBC, CBS_NEWS, WASHINGTON_POST, WSJ];

    #[test]
    fn test_catalogue_urls_are_absolute_and_unique() {
        for rule in ALL {
            let Extractor::Catalogue(feeds) = rule.extractor else {
                panic!("{} is not a catalogue", rule.name);
            };
            let mut seen = HashSet::new();
            for item in feeds {
                assert!(url::Url::parse(item.url).is_ok(), "{}: bad url {}", rule.name, item.url);
                assert!(!item.title.is_empty());
                assert!(seen.insert(item.url), "{}: duplicate {}", rule.name, item.url);
            }
        }
    }

    #[test]
    fn test_bare_and_www_hosts_match() {
        assert!(BBC.matches_hostname("bbc.co.uk"));
        assert!(BBC.matches_hostname("www.bbc.com"));
        assert!(!BBC.matches_hostname("news.bbc.co.uk"));
        assert!(WSJ.matches_hostname("www.wsj.com"));
    }
}
