pub mod bar_chart;
pub mod city_select;
pub mod kpi_card;
pub mod loading;
pub mod toast;
