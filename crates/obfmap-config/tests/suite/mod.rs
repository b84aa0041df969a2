mod loading;
mod logging;
